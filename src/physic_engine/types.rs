use anyhow::{bail, Context};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use glam::Vec2;

// ------------------------
// Color
// ------------------------

/// Couleur RGBA 8 bits, sérialisée en hexadécimal (`"#RRGGBB"`).
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Parse `#RRGGBB` ou `#RRGGBBAA` (le `#` est optionnel).
    pub fn from_hex(hex: &str) -> anyhow::Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            bail!("invalid hex color '{hex}': expected #RRGGBB or #RRGGBBAA");
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex color '{hex}'"))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if digits.len() == 8 { channel(6)? } else { 0xFF },
        })
    }

    pub fn to_hex(&self) -> String {
        if self.a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Assombrit la couleur d'un facteur `[0, 1]` (l'alpha est conservé).
    pub fn scaled(&self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * f).round() as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// ------------------------
// DrawableParticle
// ------------------------

/// État d'une particule tel que consommé par un renderer.
///
/// Layout `#[repr(C)]` + `Pod` : un renderer GPU peut copier directement
/// la slice du snapshot dans un buffer d'instances.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct DrawableParticle {
    pub pos: Vec2,
    /// Rayon du disque à dessiner (pixels)
    pub size: f32,
    /// Opacité de peinture
    pub alpha: f32,
    /// Intensité du halo (flou) à appliquer dans la couleur de la particule
    pub glow: f32,
    pub color: Color,
}

// ------------------------
// BurstEvent
// ------------------------

/// Description d'une gerbe qui vient d'être déclenchée.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstEvent {
    pub origin: Vec2,
    pub color: Color,
    pub count: usize,
}

// ------------------------
// FrameSnapshot
// ------------------------

/// Vue en lecture seule de l'état du moteur après un `tick()`.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    /// Gerbe déclenchée automatiquement pendant ce tick (s'il y en a eu une)
    pub new_burst: Option<BurstEvent>,
    pub particles: &'a [DrawableParticle],
}

impl<'a> FrameSnapshot<'a> {
    pub fn empty() -> Self {
        Self {
            new_burst: None,
            particles: &[],
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, DrawableParticle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF3F8E").unwrap();
        assert_eq!(c, Color::rgb(0xFF, 0x3F, 0x8E));
        assert_eq!(c.to_hex(), "#FF3F8E");

        let c: Color = "04c2c980".parse().unwrap();
        assert_eq!(c.a, 0x80);
        assert_eq!(c.to_string(), "#04C2C980");
    }

    #[test]
    fn test_color_from_hex_rejects_garbage() {
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#éé0000").is_err());
    }

    #[test]
    fn test_color_scaled_keeps_alpha() {
        let c = Color::rgb(200, 100, 50).scaled(0.5);
        assert_eq!(c, Color::rgb(100, 50, 25));
        assert_eq!(Color::WHITE.scaled(2.0), Color::WHITE);
    }

    #[test]
    fn test_drawable_particle_is_tightly_packed() {
        // 2 (pos) + 3 floats + 4 octets de couleur
        assert_eq!(std::mem::size_of::<DrawableParticle>(), 24);
        let particles = [DrawableParticle::default(); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&particles);
        assert_eq!(bytes.len(), 48);
    }
}
