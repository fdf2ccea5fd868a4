use rand::seq::IndexedRandom;
use rand::Rng;
use std::f32::consts::TAU;

use crate::physic_engine::{
    config::PhysicConfig,
    particle::Particle,
    types::{BurstEvent, Color, Vec2},
};

/// Tirage uniforme dans `[lo, hi)`, ou `lo` si l'intervalle est vide ou infini.
#[inline(always)]
fn sample_range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo && (hi - lo).is_finite() {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Point de départ d'une gerbe automatique.
///
/// `x` couvre toute la largeur, `y` reste dans la fraction haute du viewport
/// (`spawn_height_ratio`). Un viewport de taille nulle donne la coordonnée 0.
pub fn sample_spawn_point<R: Rng + ?Sized>(
    rng: &mut R,
    config: &PhysicConfig,
    width: f32,
    height: f32,
) -> Vec2 {
    let x = sample_range(rng, 0.0, width);
    let y = sample_range(rng, 0.0, height * config.spawn_height_ratio);
    Vec2::new(x, y)
}

/// Génère une gerbe complète en `origin` et l'ajoute à `particles`.
///
/// Toutes les particules partagent la même couleur ; direction, vitesse,
/// taille et fondu sont tirés indépendamment pour chacune.
pub fn spawn_burst<R: Rng + ?Sized>(
    rng: &mut R,
    config: &PhysicConfig,
    origin: Vec2,
    particles: &mut Vec<Particle>,
) -> BurstEvent {
    let color = config.palette.choose(rng).copied().unwrap_or(Color::WHITE);
    let count = if config.burst_max_particles > config.burst_min_particles {
        rng.random_range(config.burst_min_particles..config.burst_max_particles)
    } else {
        config.burst_min_particles
    };

    particles.reserve(count);
    particles.extend((0..count).map(|_| {
        let angle = rng.random_range(0.0..TAU);
        let speed = sample_range(rng, config.min_speed, config.max_speed);
        Particle::new(
            origin,
            Vec2::from_angle(angle) * speed,
            color,
            sample_range(rng, config.min_size, config.max_size),
            sample_range(rng, config.min_decay, config.max_decay),
        )
    }));

    BurstEvent {
        origin,
        color,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_spawn_burst_respects_ranges() {
        let config = PhysicConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut particles = Vec::new();

        for _ in 0..20 {
            particles.clear();
            let burst = spawn_burst(&mut rng, &config, Vec2::new(5.0, 6.0), &mut particles);
            assert_eq!(burst.count, particles.len());
            assert!((80..140).contains(&burst.count));
            assert!(config.palette.contains(&burst.color));

            for p in &particles {
                let speed = p.vel.length();
                assert!((1.999..8.001).contains(&speed), "speed {speed}");
                assert!((1.0..3.0).contains(&p.size));
                assert!((0.005..0.02).contains(&p.decay));
                assert_eq!(p.color, burst.color);
            }
        }
    }

    #[test]
    fn test_spawn_point_on_empty_viewport() {
        let config = PhysicConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_spawn_point(&mut rng, &config, 0.0, 0.0),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_spawn_point_on_unbounded_viewport() {
        let config = PhysicConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(
            sample_spawn_point(&mut rng, &config, f32::INFINITY, f32::INFINITY),
            Vec2::ZERO
        );
    }
}
