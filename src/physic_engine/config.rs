use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::physic_engine::palette::DEFAULT_PALETTE;
use crate::physic_engine::types::Color;

/// Chemin par défaut du fichier de configuration physique.
pub const DEFAULT_PHYSIC_CONFIG_PATH: &str = "assets/config/physic.toml";

/// Paramètres du moteur de gerbes.
///
/// Toutes les bornes `min_*..max_*` sont semi-ouvertes (`max` exclu).
/// Les champs absents d'un fichier TOML prennent leur valeur par défaut.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicConfig {
    /// Probabilité, à chaque tick, de déclencher une gerbe automatique
    pub burst_probability: f32,
    /// Incrément de `vy` appliqué à chaque tick (vers le bas)
    pub gravity: f32,

    pub burst_min_particles: usize,
    pub burst_max_particles: usize,

    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_decay: f32,
    pub max_decay: f32,

    /// Fraction haute du viewport dans laquelle naissent les gerbes automatiques
    pub spawn_height_ratio: f32,
    /// Halo transmis au renderer pour chaque particule
    pub glow_blur: f32,

    pub palette: Vec<Color>,
}

impl Default for PhysicConfig {
    fn default() -> Self {
        Self {
            burst_probability: 0.03,
            gravity: 0.05,
            burst_min_particles: 80,
            burst_max_particles: 140,
            min_speed: 2.0,
            max_speed: 8.0,
            min_size: 1.0,
            max_size: 3.0,
            min_decay: 0.005,
            max_decay: 0.02,
            spawn_height_ratio: 0.6, // 60% supérieurs du ciel
            glow_blur: 10.0,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl PhysicConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read physic config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("cannot parse physic config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Vérifie la cohérence des paramètres.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.burst_probability),
            "burst_probability must be in [0, 1] (got {})",
            self.burst_probability
        );
        ensure!(self.gravity.is_finite(), "gravity must be finite");
        ensure!(
            0 < self.burst_min_particles && self.burst_min_particles < self.burst_max_particles,
            "burst particles range is empty: [{}, {})",
            self.burst_min_particles,
            self.burst_max_particles
        );
        ensure!(
            0.0 <= self.min_speed && self.min_speed < self.max_speed,
            "speed range is invalid: [{}, {})",
            self.min_speed,
            self.max_speed
        );
        ensure!(
            0.0 < self.min_size && self.min_size < self.max_size,
            "size range is invalid: [{}, {})",
            self.min_size,
            self.max_size
        );
        ensure!(
            0.0 < self.min_decay && self.min_decay < self.max_decay && self.max_decay <= 1.0,
            "decay range is invalid: [{}, {})",
            self.min_decay,
            self.max_decay
        );
        ensure!(
            (0.0..=1.0).contains(&self.spawn_height_ratio),
            "spawn_height_ratio must be in [0, 1] (got {})",
            self.spawn_height_ratio
        );
        ensure!(
            self.glow_blur >= 0.0,
            "glow_blur must be positive (got {})",
            self.glow_blur
        );
        ensure!(!self.palette.is_empty(), "palette must not be empty");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        PhysicConfig::default().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let config = PhysicConfig {
            min_decay: 0.02,
            max_decay: 0.005,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PhysicConfig {
            burst_min_particles: 140,
            burst_max_particles: 140,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_probability_and_palette() {
        let config = PhysicConfig {
            burst_probability: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PhysicConfig {
            palette: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
