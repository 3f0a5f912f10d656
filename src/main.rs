use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use macroquad::prelude::{BLACK, Conf, clear_background, get_frame_time, mouse_position, next_frame};

use life_sketchpad::application::{Camera, Command, Flow, SimulationController, TickClock};
use life_sketchpad::audio::AudioSink;
use life_sketchpad::config::Config;
use life_sketchpad::domain::{Brush, NullSink, PatternId, ToolEngine};
use life_sketchpad::input::InputState;
use life_sketchpad::rendering::{self, ParticleField};
use life_sketchpad::ui;

#[derive(Parser, Debug)]
#[command(name = "life_sketchpad")]
#[command(version)]
#[command(about = "Interactive Game of Life sketchpad with drawing tools")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    cols: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Pattern loaded at startup, e.g. glider or gosper-glider-gun
    #[arg(short, long)]
    pattern: Option<PatternId>,

    /// Rule preset name or B/S notation such as B36/S23
    #[arg(short, long)]
    rule: Option<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Generations per second
    #[arg(long)]
    speed: Option<f32>,

    /// Disable sound
    #[arg(long)]
    mute: bool,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            Config::load(path).with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(cols) = args.cols {
        config.grid.cols = cols;
    }
    if let Some(rows) = args.rows {
        config.grid.rows = rows;
    }
    if let Some(pattern) = args.pattern {
        config.simulation.initial_pattern = pattern;
    }
    if let Some(rule) = &args.rule {
        config.simulation.rule.clone_from(rule);
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if let Some(speed) = args.speed {
        config.simulation.steps_per_second = speed;
    }
    if args.mute {
        config.effects.sound = false;
    }

    config.validate().context("invalid command-line override")?;
    Ok(config)
}

fn build_controller(config: &Config, seed: u64) -> Result<SimulationController> {
    let rule = config.rule()?;
    let tool = config.tool().unwrap_or_default();
    let brush = Brush::new(i64::from(config.tools.brush_size));

    let mut controller = SimulationController::new(config.grid.cols, config.grid.rows)?
        .with_seed(seed)
        .with_tools(ToolEngine::new(tool, brush))
        .with_rule(rule);
    controller.handle(
        Command::LoadPattern(config.simulation.initial_pattern),
        &mut NullSink,
    );
    Ok(controller)
}

async fn run(config: Config, mut controller: SimulationController, seed: u64) {
    let mut camera = Camera::new(config.display.cell_size);
    let mut clock = TickClock::new(config.simulation.steps_per_second);
    let mut input = InputState::default();
    let mut particles = config
        .effects
        .particles
        .then(|| ParticleField::new(config.effects.max_particles, seed));
    let mut audio = if config.effects.sound {
        AudioSink::load(config.grid.rows, config.effects.volume).await
    } else {
        None
    };

    loop {
        let toolbar = ui::toolbar(ui::panel_x());
        let frame = input.poll(&mut camera, &toolbar.buttons);
        if frame.speed_delta != 0.0 {
            let rate = clock.adjust(frame.speed_delta);
            log::debug!("speed: {rate} gen/s");
        }

        let mut sink = (&mut particles, &mut audio);
        let mut flow = Flow::Continue;
        for command in frame.commands {
            flow = controller.handle(command, &mut sink);
            if flow == Flow::Quit {
                break;
            }
        }
        if flow == Flow::Quit {
            log::info!("quitting at generation {}", controller.generation());
            break;
        }

        let delta_time = get_frame_time();
        if clock.advance(delta_time) {
            controller.tick(&mut sink);
        }
        if let Some(field) = particles.as_mut() {
            field.update(delta_time);
        }
        if let Some(audio) = audio.as_mut() {
            audio.play_pending();
        }

        let mouse_pos = mouse_position();
        clear_background(BLACK);
        rendering::draw_grid(controller.grid(), &camera, config.display.fade_in_generations);
        if let Some(field) = &particles {
            rendering::draw_particles(field, &camera);
        }
        rendering::draw_tool_preview(&controller, &camera, mouse_pos);
        rendering::draw_panel(&controller, &clock, &camera, &toolbar, mouse_pos);

        next_frame().await;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let seed = config.simulation.seed.unwrap_or_else(rand::random);
    let controller = build_controller(&config, seed)?;

    log::info!(
        "grid {}x{}, rule {}, {} gen/s, seed {seed}",
        config.grid.cols,
        config.grid.rows,
        controller.rule(),
        config.simulation.steps_per_second
    );

    let window = Conf {
        window_title: "Life Sketchpad".to_owned(),
        window_width: config.display.window_width,
        window_height: config.display.window_height,
        window_resizable: true,
        ..Default::default()
    };
    macroquad::Window::from_config(window, run(config, controller, seed));
    Ok(())
}
