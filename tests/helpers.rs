use canvas_fireworks::physic_engine::{
    config::PhysicConfig, BurstEvent, Color, FrameSnapshot, Particle, PhysicEngine,
    PhysicEngineFull, PhysicEngineIterator, Vec2,
};
use canvas_fireworks::renderer_engine::RendererEngine;
use std::cell::RefCell;
use std::rc::Rc;

pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Renderer qui journalise ses appels et peut simuler une erreur.
#[allow(dead_code)]
pub struct TestRenderer {
    pub log: CallLog,
    pub fail_on_render: bool,
    pub frame_sizes: Vec<usize>,
}

#[allow(dead_code)]
impl TestRenderer {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_on_render: false,
            frame_sizes: Vec::new(),
        }
    }
}

impl RendererEngine for TestRenderer {
    fn set_viewport(&mut self, width: f32, height: f32) {
        self.log
            .borrow_mut()
            .push(format!("renderer.set_viewport {width}x{height}"));
    }

    fn render_frame(&mut self, snapshot: &FrameSnapshot<'_>) -> anyhow::Result<usize> {
        self.log.borrow_mut().push("renderer.render_frame".into());
        if self.fail_on_render {
            anyhow::bail!("simulated renderer failure");
        }
        self.frame_sizes.push(snapshot.len());
        Ok(snapshot.len())
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("renderer.close".into());
    }
}

/// Moteur minimal : une particule éternelle, journalise ses appels.
#[allow(dead_code)]
pub struct TestPhysic {
    pub log: CallLog,
    config: PhysicConfig,
    viewport: (f32, f32),
    particles: Vec<Particle>,
    snapshot: Vec<canvas_fireworks::physic_engine::DrawableParticle>,
}

#[allow(dead_code)]
impl TestPhysic {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            config: PhysicConfig::default(),
            viewport: (800.0, 600.0),
            particles: vec![Particle::new(
                Vec2::new(1.0, 2.0),
                Vec2::ZERO,
                Color::WHITE,
                1.0,
                0.0,
            )],
            snapshot: Vec::new(),
        }
    }
}

impl PhysicEngineIterator for TestPhysic {
    fn iter_active_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a> {
        Box::new(self.particles.iter())
    }
}

impl PhysicEngine for TestPhysic {
    fn resize(&mut self, width: f32, height: f32) {
        self.log
            .borrow_mut()
            .push(format!("physic.resize {width}x{height}"));
        self.viewport = (width, height);
    }

    fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    fn trigger_burst(&mut self, x: f32, y: f32) -> BurstEvent {
        BurstEvent {
            origin: Vec2::new(x, y),
            color: Color::WHITE,
            count: 0,
        }
    }

    fn tick(&mut self) -> FrameSnapshot<'_> {
        self.log.borrow_mut().push("physic.tick".into());
        self.snapshot = self.particles.iter().map(|p| p.to_drawable(0.0)).collect();
        FrameSnapshot {
            new_burst: None,
            particles: &self.snapshot,
        }
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("physic.close".into());
    }

    fn reload_config(&mut self, config: &PhysicConfig) -> anyhow::Result<()> {
        self.config = config.clone();
        Ok(())
    }

    fn get_config(&self) -> &PhysicConfig {
        &self.config
    }
}

impl PhysicEngineFull for TestPhysic {}
