use crate::physic_engine::FrameSnapshot;

use anyhow::Result;

/// Peintre d'un snapshot de particules.
///
/// Chaque particule est un disque plein en `pos`, de rayon `size`, d'opacité
/// `alpha`, entouré d'un halo de `glow` unités dans sa propre couleur.
pub trait RendererEngine {
    /// Dimensions (pixels) de l'espace de simulation à projeter.
    fn set_viewport(&mut self, width: f32, height: f32);

    /// Peint une frame et retourne le nombre de particules effectivement dessinées.
    fn render_frame(&mut self, snapshot: &FrameSnapshot<'_>) -> Result<usize>;

    fn close(&mut self);
}
