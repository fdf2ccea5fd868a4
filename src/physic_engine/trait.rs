use crate::physic_engine::config::PhysicConfig;
use crate::physic_engine::particle::Particle;
use crate::physic_engine::types::{BurstEvent, FrameSnapshot};

pub trait PhysicEngineIterator {
    /// Retourne un itérateur sur les particules vivantes.
    fn iter_active_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a>;

    /// Nombre de particules vivantes.
    fn particles_count(&self) -> usize {
        self.iter_active_particles().count()
    }
}

/// 🔧 Trait `PhysicEngine`
///
/// Interface commune des moteurs de particules pilotés par une horloge de frames.
/// Le moteur ne dépend d'aucun contexte de rendu : `tick()` calcule l'état
/// suivant et renvoie un snapshot que n'importe quel renderer peut peindre.
///
/// Un moteur n'est pas réentrant : `tick()` prend `&mut self`, un seul appelant
/// à la fois le fait avancer.
pub trait PhysicEngine {
    /// Met à jour les dimensions du viewport (échantillonnage des points de départ).
    /// Les particules en vol ne sont pas modifiées.
    fn resize(&mut self, width: f32, height: f32);

    /// Dimensions courantes du viewport `(largeur, hauteur)`.
    fn viewport(&self) -> (f32, f32);

    /// Déclenche une gerbe en `(x, y)`.
    fn trigger_burst(&mut self, x: f32, y: f32) -> BurstEvent;

    /// Avance la simulation d'exactement un pas.
    fn tick(&mut self) -> FrameSnapshot<'_>;

    /// Ferme / libère le moteur physique.
    fn close(&mut self) {} // Par défaut, fait rien.

    /// Remplace la configuration (les particules vivantes sont conservées).
    fn reload_config(&mut self, config: &PhysicConfig) -> anyhow::Result<()>;

    fn get_config(&self) -> &PhysicConfig;
}

pub trait PhysicEngineFull: PhysicEngine + PhysicEngineIterator {}
