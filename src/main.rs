use anyhow::{Context, Result};
use log::{info, warn};
use std::{env, io};

use canvas_fireworks::physic_engine::config::{PhysicConfig, DEFAULT_PHYSIC_CONFIG_PATH};
use canvas_fireworks::physic_engine::PhysicEngineFireworks;
use canvas_fireworks::renderer_engine::AsciiRenderer;
use canvas_fireworks::utils::show_rust_core_dependencies;
use canvas_fireworks::{Simulator, SimulatorSettingsBuilder};

/// Taille du canvas simulé (pixels)
const CANVAS_WIDTH: f32 = 1024.0;
const CANVAS_HEIGHT: f32 = 800.0;
/// Grille du terminal
const TERM_COLS: usize = 120;
const TERM_ROWS: usize = 40;

/// Main entry point: fireworks in the terminal.
fn main() -> Result<()> {
    env_logger::init();

    info!("🎆 Starting canvas fireworks...");

    show_rust_core_dependencies();

    let config_path =
        env::var("FIREWORKS_CONFIG").unwrap_or_else(|_| DEFAULT_PHYSIC_CONFIG_PATH.to_string());
    let physic_config = PhysicConfig::from_file(&config_path).unwrap_or_else(|e| {
        warn!("Using default physic config ({e:#})");
        PhysicConfig::default()
    });
    info!("Physic config loaded:\n{:#?}", physic_config);

    // priorité à l'argument CLI : nombre de frames à jouer
    let max_frames = env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()
        .context("frame count must be a positive integer")?;

    let seed = env::var("FIREWORKS_SEED")
        .ok()
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("FIREWORKS_SEED must be an unsigned integer")?;

    let physic_engine = match seed {
        Some(seed) => {
            info!("Deterministic run, seed = {seed}");
            PhysicEngineFireworks::with_seed(&physic_config, CANVAS_WIDTH, CANVAS_HEIGHT, seed)
        }
        None => PhysicEngineFireworks::new(&physic_config, CANVAS_WIDTH, CANVAS_HEIGHT),
    };

    let renderer_engine = AsciiRenderer::new(io::stdout(), TERM_COLS, TERM_ROWS, true);

    let mut settings = SimulatorSettingsBuilder::default();
    if let Some(max_frames) = max_frames {
        settings = settings.max_frames(max_frames);
    }

    let mut simulator = Simulator::new(renderer_engine, physic_engine, settings.build()?);

    let result = simulator.run();
    simulator.close();

    result
}
