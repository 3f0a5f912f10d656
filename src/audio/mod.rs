//! Sound effects for grid events.
//!
//! Events are summed over a frame and turned into at most one birth tone and
//! one death tone. Playback needs the `audio` feature; without it the
//! accumulator still runs and the tones are dropped.

mod synth;

pub use synth::{PENTATONIC, SAMPLE_RATE, Waveform, scale_degree, tone_wav, volume_for};

use crate::domain::{Cell, EffectSink, PatternId};

/// A tone to play this frame
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ToneRequest {
    pub degree: usize,
    pub volume: f32,
}

/// Tones owed for one frame of events
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct FrameTones {
    pub birth: Option<ToneRequest>,
    pub death: Option<ToneRequest>,
    pub pattern_loaded: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    count: usize,
    row_sum: u64,
}

impl Tally {
    fn add(&mut self, cell: Cell) {
        self.count += 1;
        self.row_sum += cell.row.max(0) as u64;
    }

    fn request(self, rows: usize, base_volume: f32) -> Option<ToneRequest> {
        if self.count == 0 {
            return None;
        }
        let mean_row = self.row_sum as f32 / self.count as f32;
        Some(ToneRequest {
            degree: scale_degree(mean_row, rows),
            volume: volume_for(self.count, base_volume),
        })
    }
}

/// Collects events between frames
#[derive(Clone, Debug)]
pub struct ToneAccumulator {
    rows: usize,
    base_volume: f32,
    births: Tally,
    deaths: Tally,
    pattern_loaded: bool,
}

impl ToneAccumulator {
    pub fn new(rows: usize, base_volume: f32) -> Self {
        Self {
            rows,
            base_volume,
            births: Tally::default(),
            deaths: Tally::default(),
            pattern_loaded: false,
        }
    }

    /// Tones for everything since the last call
    pub fn take(&mut self) -> FrameTones {
        let tones = FrameTones {
            birth: self.births.request(self.rows, self.base_volume),
            death: self.deaths.request(self.rows, self.base_volume),
            pattern_loaded: self.pattern_loaded,
        };
        self.births = Tally::default();
        self.deaths = Tally::default();
        self.pattern_loaded = false;
        tones
    }
}

impl EffectSink for ToneAccumulator {
    fn on_birth(&mut self, cell: Cell) {
        self.births.add(cell);
    }

    fn on_death(&mut self, cell: Cell) {
        self.deaths.add(cell);
    }

    fn on_pattern_loaded(&mut self, _pattern: PatternId) {
        self.pattern_loaded = true;
    }
}

#[cfg(feature = "audio")]
mod playback {
    use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound};

    use super::{FrameTones, PENTATONIC, ToneRequest, Waveform, tone_wav};

    const BIRTH_TONE_SECONDS: f32 = 0.12;
    const DEATH_TONE_SECONDS: f32 = 0.2;

    /// One pre-rendered sound per scale degree for births and for deaths
    pub struct ToneBank {
        births: Vec<Sound>,
        deaths: Vec<Sound>,
    }

    impl ToneBank {
        pub async fn load() -> Result<Self, macroquad::Error> {
            let mut births = Vec::with_capacity(PENTATONIC.len());
            let mut deaths = Vec::with_capacity(PENTATONIC.len());
            for frequency in PENTATONIC {
                let wav = tone_wav(frequency, BIRTH_TONE_SECONDS, Waveform::Sine);
                births.push(load_sound_from_bytes(&wav).await?);
                // an octave down
                let wav = tone_wav(frequency / 2.0, DEATH_TONE_SECONDS, Waveform::Triangle);
                deaths.push(load_sound_from_bytes(&wav).await?);
            }
            Ok(Self { births, deaths })
        }

        fn play(sounds: &[Sound], request: ToneRequest) {
            if let Some(sound) = sounds.get(request.degree) {
                play_sound(
                    sound,
                    PlaySoundParams {
                        looped: false,
                        volume: request.volume,
                    },
                );
            }
        }

        pub fn play_frame(&self, tones: FrameTones, volume: f32) {
            if let Some(request) = tones.birth {
                Self::play(&self.births, request);
            }
            if let Some(request) = tones.death {
                Self::play(&self.deaths, request);
            }
            if tones.pattern_loaded {
                let chime = ToneRequest {
                    degree: PENTATONIC.len() - 1,
                    volume,
                };
                Self::play(&self.births, chime);
            }
        }
    }
}

#[cfg(feature = "audio")]
pub use playback::ToneBank;

/// EffectSink that plays accumulated tones once per frame
pub struct AudioSink {
    tones: ToneAccumulator,
    volume: f32,
    #[cfg(feature = "audio")]
    bank: ToneBank,
}

impl AudioSink {
    /// Synthesize the tone bank. `None` when no sound can be played.
    pub async fn load(rows: usize, volume: f32) -> Option<Self> {
        #[cfg(feature = "audio")]
        {
            match ToneBank::load().await {
                Ok(bank) => Some(Self {
                    tones: ToneAccumulator::new(rows, volume),
                    volume,
                    bank,
                }),
                Err(err) => {
                    log::warn!("sound disabled, failed to load tones: {err}");
                    None
                }
            }
        }
        #[cfg(not(feature = "audio"))]
        {
            let _ = (rows, volume);
            log::warn!("sound disabled, built without the `audio` feature");
            None
        }
    }

    /// Play this frame's tones and reset the tally
    pub fn play_pending(&mut self) {
        let tones = self.tones.take();
        #[cfg(feature = "audio")]
        self.bank.play_frame(tones, self.volume);
        #[cfg(not(feature = "audio"))]
        let _ = (tones, self.volume);
    }
}

impl EffectSink for AudioSink {
    fn on_birth(&mut self, cell: Cell) {
        self.tones.on_birth(cell);
    }

    fn on_death(&mut self, cell: Cell) {
        self.tones.on_death(cell);
    }

    fn on_pattern_loaded(&mut self, pattern: PatternId) {
        self.tones.on_pattern_loaded(pattern);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tone_per_kind_per_frame() {
        let mut acc = ToneAccumulator::new(60, 0.2);
        for col in 0..8 {
            acc.on_birth(Cell::new(col, 0));
        }
        acc.on_death(Cell::new(0, 59));

        let tones = acc.take();
        let birth = tones.birth.map(|t| t.degree);
        assert_eq!(birth, Some(PENTATONIC.len() - 1));
        assert_eq!(tones.death.map(|t| t.degree), Some(0));
        assert!(tones.birth.map_or(0.0, |t| t.volume) > tones.death.map_or(0.0, |t| t.volume));
        assert!(!tones.pattern_loaded);
    }

    #[test]
    fn test_take_resets() {
        let mut acc = ToneAccumulator::new(60, 0.2);
        acc.on_birth(Cell::new(1, 30));
        acc.on_pattern_loaded(PatternId::Acorn);
        let first = acc.take();
        assert!(first.birth.is_some());
        assert!(first.pattern_loaded);
        assert_eq!(acc.take(), FrameTones::default());
    }

    #[test]
    fn test_pitch_uses_mean_row() {
        let mut acc = ToneAccumulator::new(61, 0.2);
        acc.on_death(Cell::new(0, 0));
        acc.on_death(Cell::new(0, 60));
        let degree = acc.take().death.map(|t| t.degree);
        assert_eq!(degree, Some(scale_degree(30.0, 61)));
    }
}
