pub mod r#trait;
pub use r#trait::{PhysicEngine, PhysicEngineFull, PhysicEngineIterator};

pub mod types;
pub use self::types::{BurstEvent, Color, DrawableParticle, FrameSnapshot, Vec2};

pub mod palette;
pub use self::palette::DEFAULT_PALETTE;

pub mod particle;
pub use self::particle::Particle;

pub mod burst;

pub mod config;
pub use self::config::PhysicConfig;

pub mod physic_engine_fireworks;
pub use self::physic_engine_fireworks::PhysicEngineFireworks;
