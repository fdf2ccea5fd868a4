use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::physic_engine::{
    burst::{sample_spawn_point, spawn_burst},
    config::PhysicConfig,
    particle::Particle,
    types::{BurstEvent, DrawableParticle, FrameSnapshot, Vec2},
    PhysicEngine, PhysicEngineFull, PhysicEngineIterator,
};

/// Moteur de gerbes de feux d'artifice.
///
/// Possède seul l'ensemble des particules vivantes (`Vec`, ordre d'itération
/// déterministe). La source d'aléa est injectable : `with_seed` / `with_rng`
/// rendent une simulation entièrement reproductible.
#[derive(Debug)]
pub struct PhysicEngineFireworks<R: Rng = StdRng> {
    particles: Vec<Particle>,
    // Buffer de snapshot réutilisé d'un tick à l'autre
    snapshot: Vec<DrawableParticle>,

    width: f32,
    height: f32,
    rng: R,

    config: PhysicConfig,
    bursts_triggered: u64,
}

impl PhysicEngineFireworks<StdRng> {
    pub fn new(config: &PhysicConfig, width: f32, height: f32) -> Self {
        Self::with_rng(config, width, height, StdRng::from_os_rng())
    }

    pub fn with_seed(config: &PhysicConfig, width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(config, width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PhysicEngineFireworks<R> {
    pub fn with_rng(config: &PhysicConfig, width: f32, height: f32, rng: R) -> Self {
        let mut engine = Self {
            particles: Vec::new(),
            snapshot: Vec::new(),
            width: 0.0,
            height: 0.0,
            rng,
            config: config.clone(),
            bursts_triggered: 0,
        };
        engine.resize(width, height);
        engine
    }

    /// Particules vivantes, dans l'ordre de création.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Nombre total de gerbes déclenchées (manuelles + automatiques).
    pub fn bursts_triggered(&self) -> u64 {
        self.bursts_triggered
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        // NaN, infini ou négatif : ramené à 0 (random_range exige un intervalle fini)
        let clamp = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.width = clamp(width);
        self.height = clamp(height);
        debug!("Viewport resized: {} x {}", self.width, self.height);
    }

    pub fn trigger_burst(&mut self, x: f32, y: f32) -> BurstEvent {
        let burst = spawn_burst(
            &mut self.rng,
            &self.config,
            Vec2::new(x, y),
            &mut self.particles,
        );
        self.bursts_triggered += 1;
        debug!(
            "🎆 Burst of {} particles ({}) at ({:.1}, {:.1})",
            burst.count, burst.color, x, y
        );
        burst
    }

    /// Tirage de la gerbe automatique du tick.
    fn roll_autonomous_burst(&mut self) -> Option<BurstEvent> {
        // random() est dans [0, 1) : une probabilité de 0 ne déclenche jamais
        if self.rng.random::<f32>() >= self.config.burst_probability {
            return None;
        }
        let origin = sample_spawn_point(&mut self.rng, &self.config, self.width, self.height);
        Some(self.trigger_burst(origin.x, origin.y))
    }

    pub fn tick(&mut self) -> FrameSnapshot<'_> {
        let new_burst = self.roll_autonomous_burst();

        // Une seule passe : chaque particule est intégrée exactement une fois,
        // celles dont l'alpha tombe à 0 sont retirées dans la foulée.
        let gravity = self.config.gravity;
        self.particles.retain_mut(|p| p.integrate(gravity));

        let glow = self.config.glow_blur;
        self.snapshot.clear();
        self.snapshot
            .extend(self.particles.iter().map(|p| p.to_drawable(glow)));

        FrameSnapshot {
            new_burst,
            particles: &self.snapshot,
        }
    }

    pub fn reload_config(&mut self, config: &PhysicConfig) -> anyhow::Result<()> {
        config.validate()?;
        self.config = config.clone();
        info!("Physic config reloaded ({} live particles kept)", self.particles.len());
        Ok(())
    }
}

// ==================================
// Trait PhysicEngine
// ==================================
impl<R: Rng> PhysicEngineIterator for PhysicEngineFireworks<R> {
    fn iter_active_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a> {
        Box::new(self.particles.iter())
    }

    fn particles_count(&self) -> usize {
        self.particles.len()
    }
}

impl<R: Rng> PhysicEngine for PhysicEngineFireworks<R> {
    fn resize(&mut self, width: f32, height: f32) {
        self.resize(width, height)
    }

    fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn trigger_burst(&mut self, x: f32, y: f32) -> BurstEvent {
        self.trigger_burst(x, y)
    }

    fn tick(&mut self) -> FrameSnapshot<'_> {
        self.tick()
    }

    fn close(&mut self) {
        self.particles.clear();
        self.snapshot.clear();
        debug!("PhysicEngineFireworks closed and reset.");
    }

    fn reload_config(&mut self, config: &PhysicConfig) -> anyhow::Result<()> {
        self.reload_config(config)
    }

    fn get_config(&self) -> &PhysicConfig {
        &self.config
    }
}

impl<R: Rng> PhysicEngineFull for PhysicEngineFireworks<R> {}

// ==================================
// Helpers pour tests
// ==================================
#[cfg(any(test, feature = "test_helpers"))]
pub trait PhysicEngineTestHelpers {
    /// Ajoute une particule arbitraire à l'ensemble vivant.
    fn inject_particle(&mut self, particle: Particle);
    /// Force la probabilité de gerbe automatique (0 = jamais, 1 = à chaque tick).
    fn force_burst_probability(&mut self, probability: f32);
}

#[cfg(any(test, feature = "test_helpers"))]
impl<R: Rng> PhysicEngineTestHelpers for PhysicEngineFireworks<R> {
    fn inject_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    fn force_burst_probability(&mut self, probability: f32) {
        self.config.burst_probability = probability;
    }
}
