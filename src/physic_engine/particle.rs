use crate::physic_engine::types::{Color, DrawableParticle, Vec2};

/// Particule d'une gerbe.
///
/// `color`, `size` et `decay` sont fixés à la création et ne changent plus.
/// Une particule vivante vérifie toujours `0 < alpha <= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: f32,
    pub color: Color,
    pub size: f32,
    pub decay: f32,
}

impl Particle {
    /// Nouvelle particule, opacité pleine.
    pub fn new(pos: Vec2, vel: Vec2, color: Color, size: f32, decay: f32) -> Self {
        Self {
            pos,
            vel,
            alpha: 1.0,
            color,
            size,
            decay,
        }
    }

    /// Avance la particule d'un pas (position, gravité, fondu).
    /// Retourne `true` si la particule est toujours vivante.
    #[inline(always)]
    pub fn integrate(&mut self, gravity: f32) -> bool {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.alpha -= self.decay;
        self.is_alive()
    }

    #[inline(always)]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    #[inline(always)]
    pub fn to_drawable(&self, glow: f32) -> DrawableParticle {
        DrawableParticle {
            pos: self.pos,
            size: self.size,
            alpha: self.alpha,
            glow,
            color: self.color,
        }
    }
}
