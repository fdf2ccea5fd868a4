use itertools::{Itertools, MinMaxResult};
use log::info;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Valeur de métrique typée (soit f32 soit usize)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Usize(usize),
    F32(f32),
}

impl MetricValue {
    fn as_f32(&self) -> f32 {
        match self {
            MetricValue::Usize(u) => *u as f32,
            MetricValue::F32(v) => *v,
        }
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Usize(v)
    }
}
impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::F32(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Usize(u) => write!(f, "{}", u),
            MetricValue::F32(v) => write!(f, "{:.2}", v),
        }
    }
}

/// Statistiques d'une série : moyenne, min, max
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub avg: f32,
    pub min: f32,
    pub max: f32,
}

/// Données internes du profiler
struct ProfilerInner {
    samples: HashMap<String, VecDeque<f32>>, // Durées (ms) RAII / profile_block
    metrics: HashMap<String, VecDeque<MetricValue>>, // Valeurs scalaires typées
    total_frame_times: VecDeque<f32>,
    max_samples: usize,
}

/// Ajoute une valeur à une fenêtre glissante de `max` éléments
fn push_bounded<T>(buffer: &mut VecDeque<T>, value: T, max: usize) {
    if buffer.len() >= max {
        buffer.pop_front();
    }
    buffer.push_back(value);
}

/// Profiler partagé et thread-safe
#[derive(Clone)]
pub struct Profiler {
    inner: Arc<RwLock<ProfilerInner>>,
}

impl Profiler {
    pub fn new(max_samples: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ProfilerInner {
                samples: HashMap::new(),
                metrics: HashMap::new(),
                total_frame_times: VecDeque::with_capacity(max_samples),
                max_samples: max_samples.max(1),
            })),
        }
    }

    // Un panic pendant une mesure ne doit pas rendre le profiler inutilisable
    fn read(&self) -> RwLockReadGuard<'_, ProfilerInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProfilerInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_sample(&self, label: &str, ms: f32) {
        let mut inner = self.write();
        let max = inner.max_samples;
        let buffer = inner.samples.entry(label.to_owned()).or_default();
        push_bounded(buffer, ms, max);
    }

    /// Mesure globale d'une frame (RAII)
    pub fn frame(&self) -> FrameGuard {
        FrameGuard {
            profiler: self.clone(),
            start: Instant::now(),
        }
    }

    /// Mesure d'un bloc labelisé (RAII)
    pub fn measure(&self, label: impl Into<String>) -> MeasureGuard<'_> {
        MeasureGuard {
            profiler: self,
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// Profile un bloc de code et retourne sa valeur de retour
    pub fn profile_block<T, F>(&self, label: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        self.record_sample(label, start.elapsed().as_secs_f32() * 1000.0);
        result
    }

    /// Enregistre une métrique scalaire typée
    pub fn record_metric<T: Into<MetricValue>>(&self, label: &str, value: T) {
        let mut inner = self.write();
        let max = inner.max_samples;
        let buffer = inner.metrics.entry(label.to_owned()).or_default();
        push_bounded(buffer, value.into(), max);
    }

    /// Dernière valeur enregistrée pour une métrique
    pub fn last_metric(&self, label: &str) -> Option<MetricValue> {
        self.read()
            .metrics
            .get(label)
            .and_then(|series| series.back().copied())
    }

    /// Retourne le FPS moyen
    pub fn fps(&self) -> f32 {
        let inner = self.read();
        summarize(inner.total_frame_times.iter().copied())
            .filter(|s| s.avg > 0.0)
            .map_or(0.0, |s| 1000.0 / s.avg)
    }

    /// Nombre de frames dans la fenêtre courante
    pub fn total_frames(&self) -> usize {
        self.read().total_frame_times.len()
    }

    /// Résumé des temps mesurés (ms)
    pub fn summary(&self) -> HashMap<String, SeriesSummary> {
        let inner = self.read();
        inner
            .samples
            .iter()
            .filter_map(|(k, v)| summarize(v.iter().copied()).map(|s| (k.clone(), s)))
            .collect()
    }

    /// Résumé pour une métrique spécifique
    pub fn metric_summary(&self, label: &str) -> Option<SeriesSummary> {
        let inner = self.read();
        inner
            .metrics
            .get(label)
            .and_then(|v| summarize(v.iter().map(MetricValue::as_f32)))
    }

    /// Résumé des métriques scalaires
    pub fn metrics_summary(&self) -> HashMap<String, SeriesSummary> {
        let inner = self.read();
        inner
            .metrics
            .iter()
            .filter_map(|(k, v)| summarize(v.iter().map(MetricValue::as_f32)).map(|s| (k.clone(), s)))
            .collect()
    }

    /// Log toutes les métriques vers l’info log avec un target spécifique
    pub fn log_metrics_for_target(&self, target: &str, show_fps: bool) {
        if show_fps {
            info!(target: target, "{:.2} FPS", self.fps());
        }
        // tri par label pour un affichage stable
        for (label, s) in self.summary().into_iter().sorted_by(|a, b| a.0.cmp(&b.0)) {
            info!(
                target: target,
                "{}: avg = {:.3} ms | min = {:.3} ms | max = {:.3} ms",
                label, s.avg, s.min, s.max
            );
        }
        for (label, s) in self
            .metrics_summary()
            .into_iter()
            .sorted_by(|a, b| a.0.cmp(&b.0))
        {
            info!(
                target: target,
                "{label}: avg={:.2}, min={:.2}, max={:.2}",
                s.avg, s.min, s.max
            );
        }
    }
}

/// Moyenne / min / max d'une série (None si vide)
fn summarize(series: impl Iterator<Item = f32> + Clone) -> Option<SeriesSummary> {
    let (min, max) = match series.clone().minmax_by(f32::total_cmp) {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let (sum, count) = series.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    Some(SeriesSummary {
        avg: sum / count as f32,
        min,
        max,
    })
}

/// Mesure globale d'une frame
pub struct FrameGuard {
    profiler: Profiler,
    start: Instant,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        let dt = self.start.elapsed().as_secs_f32() * 1000.0;
        let mut inner = self.profiler.write();
        let max = inner.max_samples;
        push_bounded(&mut inner.total_frame_times, dt, max);
    }
}

/// Mesure d’un bloc labelisé (RAII)
pub struct MeasureGuard<'a> {
    profiler: &'a Profiler,
    label: String,
    start: Instant,
}

impl Drop for MeasureGuard<'_> {
    fn drop(&mut self) {
        let dt = self.start.elapsed().as_secs_f32() * 1000.0;
        self.profiler.record_sample(&self.label, dt);
    }
}

/// Macro helper : déduit automatiquement le target via le module appelant
// macro module_path!() qui est évaluée au moment de la compilation pour obtenir le module courant.
#[macro_export]
macro_rules! log_metrics_and_fps {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), true);
    };
}
