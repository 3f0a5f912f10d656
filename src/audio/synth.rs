//! Tone synthesis into in-memory WAV files.

pub const SAMPLE_RATE: u32 = 22_050;

/// Two octaves of the C major pentatonic scale, in Hz
pub const PENTATONIC: [f32; 10] = [
    261.63, 293.66, 329.63, 392.00, 440.00, 523.25, 587.33, 659.25, 783.99, 880.00,
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Waveform {
    Sine,
    Triangle,
}

impl Waveform {
    /// Sample at `phase` in [0, 1)
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * std::f32::consts::TAU).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

/// Scale degree for cells around `mean_row`: rows near the top sound higher
pub fn scale_degree(mean_row: f32, rows: usize) -> usize {
    if rows <= 1 {
        return 0;
    }
    let height = (mean_row / (rows - 1) as f32).clamp(0.0, 1.0);
    ((1.0 - height) * (PENTATONIC.len() - 1) as f32).round() as usize
}

/// Playback volume for `count` simultaneous events, growing slowly with count
pub fn volume_for(count: usize, base: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    (base * (1.0 + (count as f32).log2() / 4.0)).min(1.0)
}

/// Mono 16-bit PCM WAV of a decaying tone
pub fn tone_wav(frequency: f32, duration: f32, waveform: Waveform) -> Vec<u8> {
    let samples = (duration.max(0.0) * SAMPLE_RATE as f32) as u32;
    let data_len = samples * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    for i in 0..samples {
        let t = i as f32 / SAMPLE_RATE as f32;
        let phase = (t * frequency).fract();
        let envelope = 1.0 - i as f32 / samples as f32;
        let value = waveform.sample(phase) * envelope * envelope;
        let pcm = (value * f32::from(i16::MAX)) as i16;
        wav.extend_from_slice(&pcm.to_le_bytes());
    }
    wav
}
