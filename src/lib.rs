pub mod simulator;
pub use simulator::{Simulator, SimulatorHandle, SimulatorSettings, SimulatorSettingsBuilder};
// Renderer engine
pub mod renderer_engine;
pub use renderer_engine::RendererEngine;
// Physic engine
pub mod physic_engine;
pub use physic_engine::PhysicEngine;

// Profiler
pub mod profiler;
// Utilities
pub mod utils;
