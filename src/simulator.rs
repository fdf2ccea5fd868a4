use crate::log_metrics_and_fps;
use crate::physic_engine::PhysicEngineFull;
use crate::profiler::Profiler;
use crate::renderer_engine::RendererEngine;
use crossbeam_channel::{Receiver, Sender};
use derive_builder::Builder;
use log::{debug, info};
use std::time::{Duration, Instant};

pub const DEFAULT_TARGET_FPS: f32 = 60.0;
pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_PROFILER_WINDOW: usize = 200;

// =========================
// Simulator Settings
// =========================

/// Cadence et instrumentation de l'horloge de frames.
#[derive(Clone, Builder, Debug)]
#[builder(pattern = "owned", build_fn(error = "anyhow::Error"))]
pub struct SimulatorSettings {
    /// Fréquence cible des ticks (≈ rafraîchissement écran)
    #[builder(default = "DEFAULT_TARGET_FPS")]
    pub target_fps: f32,

    /// Nombre maximum de frames avant arrêt (None = infini)
    #[builder(default, setter(strip_option))]
    pub max_frames: Option<u64>,

    /// Période d'affichage des métriques
    #[builder(default = "DEFAULT_LOG_INTERVAL")]
    pub log_interval: Duration,

    /// Taille de la fenêtre glissante du profiler
    #[builder(default = "DEFAULT_PROFILER_WINDOW")]
    pub profiler_window: usize,

    /// Dort entre deux frames pour tenir la cadence (désactivé en test)
    #[builder(default = "true")]
    pub pace_frames: bool,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            max_frames: None,
            log_interval: DEFAULT_LOG_INTERVAL,
            profiler_window: DEFAULT_PROFILER_WINDOW,
            pace_frames: true,
        }
    }
}

impl SimulatorSettings {
    /// Durée d'une frame, zéro si aucune cadence n'est imposée
    pub fn frame_duration(&self) -> Duration {
        if self.target_fps > 0.0 && self.target_fps.is_finite() {
            Duration::from_secs_f32(1.0 / self.target_fps)
        } else {
            Duration::ZERO
        }
    }
}

// =========================
// Events & handle
// =========================

/// Requêtes adressées à l'horloge depuis l'extérieur de la boucle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulatorEvent {
    Resize { width: f32, height: f32 },
    Stop,
}

/// Poignée clonable (et `Send`) vers un `Simulator`.
///
/// Les requêtes sont mises en file et appliquées entre deux ticks : un
/// redimensionnement n'est donc jamais concurrent d'un `tick()`.
#[derive(Debug, Clone)]
pub struct SimulatorHandle {
    sender: Sender<SimulatorEvent>,
}

impl SimulatorHandle {
    /// Retourne `false` si le simulateur n'existe plus.
    pub fn resize(&self, width: f32, height: f32) -> bool {
        self.sender
            .send(SimulatorEvent::Resize { width, height })
            .is_ok()
    }

    pub fn stop(&self) -> bool {
        self.sender.send(SimulatorEvent::Stop).is_ok()
    }
}

// =========================
// Simulator
// =========================

/// Horloge de frames : fait avancer le moteur d'un tick par frame et passe
/// chaque snapshot au renderer.
pub struct Simulator<R, P>
where
    R: RendererEngine,
    P: PhysicEngineFull,
{
    renderer_engine: R,
    physic_engine: P,
    settings: SimulatorSettings,

    events_sender: Sender<SimulatorEvent>,
    events_receiver: Receiver<SimulatorEvent>,

    profiler: Profiler,
    frames: u64,
    bursts: u64,
    stop_requested: bool,
    last_log: Instant,
}

impl<R, P> Simulator<R, P>
where
    R: RendererEngine,
    P: PhysicEngineFull,
{
    pub fn new(mut renderer_engine: R, physic_engine: P, settings: SimulatorSettings) -> Self {
        let (width, height) = physic_engine.viewport();
        renderer_engine.set_viewport(width, height);

        let (events_sender, events_receiver) = crossbeam_channel::unbounded();

        Self {
            renderer_engine,
            physic_engine,
            profiler: Profiler::new(settings.profiler_window),
            settings,
            events_sender,
            events_receiver,
            frames: 0,
            bursts: 0,
            stop_requested: false,
            last_log: Instant::now(),
        }
    }

    pub fn handle(&self) -> SimulatorHandle {
        SimulatorHandle {
            sender: self.events_sender.clone(),
        }
    }

    pub fn physic_engine(&self) -> &P {
        &self.physic_engine
    }

    pub fn physic_engine_mut(&mut self) -> &mut P {
        &mut self.physic_engine
    }

    pub fn renderer_engine(&self) -> &R {
        &self.renderer_engine
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    /// Nombre de frames rendues
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Nombre de gerbes automatiques observées
    pub fn bursts(&self) -> u64 {
        self.bursts
    }

    /// Applique les requêtes en attente. Retourne `false` si un arrêt est demandé.
    fn drain_events(&mut self) -> bool {
        for event in self.events_receiver.try_iter() {
            match event {
                SimulatorEvent::Resize { width, height } => {
                    self.physic_engine.resize(width, height);
                    let (w, h) = self.physic_engine.viewport();
                    self.renderer_engine.set_viewport(w, h);
                    info!("🖥️ Viewport resized: {} x {}", w, h);
                }
                SimulatorEvent::Stop => {
                    info!("🛑 Stop requested");
                    self.stop_requested = true;
                }
            }
        }
        !self.stop_requested
    }

    /// Exécute une frame. Retourne `Ok(false)` quand la boucle doit s'arrêter.
    pub fn step(&mut self) -> anyhow::Result<bool> {
        if !self.drain_events() {
            return Ok(false);
        }
        if self
            .settings
            .max_frames
            .is_some_and(|max| self.frames >= max)
        {
            return Ok(false);
        }

        // 🔹 start global frame
        let _frame_guard = self.profiler.frame(); // RAII: mesure totale de la frame

        let snapshot = {
            let _t = self.profiler.measure("physic - tick");
            self.physic_engine.tick()
        };

        if let Some(burst) = &snapshot.new_burst {
            self.bursts += 1;
            debug!(
                "🎆 Burst: {} particles at ({:.1}, {:.1})",
                burst.count, burst.origin.x, burst.origin.y
            );
        }

        let drawn = {
            let _t = self.profiler.measure("render frame");
            self.renderer_engine.render_frame(&snapshot)?
        };

        self.profiler.record_metric("live particles", snapshot.len());
        self.profiler.record_metric("particles drawn", drawn);

        if self.frames == 0 {
            info!("🚀 First frame rendered");
        }
        self.frames += 1;

        // affichage périodique
        if self.last_log.elapsed() >= self.settings.log_interval {
            log_metrics_and_fps!(&self.profiler);
            info!("Frames: {} | Bursts: {}", self.frames, self.bursts);
            self.last_log = Instant::now();
        }

        Ok(true)
    }

    /// Boucle principale : une frame par période jusqu'à l'arrêt.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let frame_duration = self.settings.frame_duration();
        info!(
            "🎆 Fireworks loop started ({:.0} fps target)",
            self.settings.target_fps
        );

        loop {
            let frame_start = Instant::now();
            if !self.step()? {
                break;
            }
            if self.settings.pace_frames {
                if let Some(rest) = frame_duration.checked_sub(frame_start.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        info!(
            "Fireworks loop finished after {} frames ({} bursts)",
            self.frames, self.bursts
        );
        Ok(())
    }

    pub fn close(&mut self) {
        self.renderer_engine.close();
        self.physic_engine.close();
        log_metrics_and_fps!(&self.profiler);
    }
}
