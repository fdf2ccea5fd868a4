use crate::physic_engine::FrameSnapshot;
use crate::renderer_engine::RendererEngine;

/// Renderer sans sortie : compte seulement ce qui lui est soumis.
/// Utile pour les runs headless et les benchmarks.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
    pub particles_drawn: u64,
    pub viewport: (f32, f32),
}

impl RendererEngine for NullRenderer {
    fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    fn render_frame(&mut self, snapshot: &FrameSnapshot<'_>) -> anyhow::Result<usize> {
        self.frames += 1;
        self.particles_drawn += snapshot.len() as u64;
        Ok(snapshot.len())
    }

    fn close(&mut self) {}
}
