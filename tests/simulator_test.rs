use canvas_fireworks::physic_engine::{
    config::PhysicConfig, physic_engine_fireworks::PhysicEngineTestHelpers, PhysicEngine,
    PhysicEngineFireworks, PhysicEngineIterator,
};
use canvas_fireworks::renderer_engine::NullRenderer;
use canvas_fireworks::{Simulator, SimulatorSettings, SimulatorSettingsBuilder};
use std::cell::RefCell;
use std::rc::Rc;
mod helpers;
use helpers::{TestPhysic, TestRenderer};

fn unpaced() -> SimulatorSettingsBuilder {
    SimulatorSettingsBuilder::default().pace_frames(false)
}

#[test]
fn test_settings_builder_defaults() -> anyhow::Result<()> {
    let settings = SimulatorSettingsBuilder::default().build()?;
    assert_eq!(settings.target_fps, 60.0);
    assert_eq!(settings.max_frames, None);
    assert!(settings.pace_frames);
    assert_eq!(
        settings.frame_duration(),
        SimulatorSettings::default().frame_duration()
    );

    let settings = SimulatorSettingsBuilder::default().target_fps(0.0).build()?;
    assert_eq!(settings.frame_duration(), std::time::Duration::ZERO);
    Ok(())
}

#[test]
fn test_step_ticks_then_renders() -> anyhow::Result<()> {
    let log = Rc::new(RefCell::new(vec![]));
    let renderer = TestRenderer::new(log.clone());
    let physic = TestPhysic::new(log.clone());

    let mut sim = Simulator::new(renderer, physic, unpaced().build()?);
    assert!(sim.step()?);
    sim.close();

    assert_eq!(
        *log.borrow(),
        vec![
            "renderer.set_viewport 800x600",
            "physic.tick",
            "renderer.render_frame",
            "renderer.close",
            "physic.close",
        ]
    );
    assert_eq!(sim.renderer_engine().frame_sizes, vec![1]);
    assert_eq!(sim.frames(), 1);
    Ok(())
}

#[test]
fn test_run_stops_after_max_frames() -> anyhow::Result<()> {
    let physic = PhysicEngineFireworks::with_seed(&PhysicConfig::default(), 800.0, 600.0, 3);
    let mut sim = Simulator::new(
        NullRenderer::default(),
        physic,
        unpaced().max_frames(120).build()?,
    );

    sim.run()?;

    assert_eq!(sim.frames(), 120);
    assert_eq!(sim.renderer_engine().frames, 120);
    assert_eq!(sim.renderer_engine().viewport, (800.0, 600.0));
    assert_eq!(sim.bursts(), sim.physic_engine().bursts_triggered());
    assert!(!sim.step()?, "no frame beyond the limit");
    Ok(())
}

#[test]
fn test_resize_request_applied_before_next_tick() -> anyhow::Result<()> {
    let log = Rc::new(RefCell::new(vec![]));
    let mut sim = Simulator::new(
        TestRenderer::new(log.clone()),
        TestPhysic::new(log.clone()),
        unpaced().build()?,
    );
    let handle = sim.handle();

    // la requête vient d'un autre thread
    std::thread::spawn(move || assert!(handle.resize(320.0, 200.0)))
        .join()
        .expect("resize thread panicked");
    assert!(sim.step()?);

    assert_eq!(
        *log.borrow(),
        vec![
            "renderer.set_viewport 800x600",
            "physic.resize 320x200",
            "renderer.set_viewport 320x200",
            "physic.tick",
            "renderer.render_frame",
        ]
    );
    assert_eq!(sim.physic_engine().viewport(), (320.0, 200.0));
    Ok(())
}

#[test]
fn test_stop_request_ends_run() -> anyhow::Result<()> {
    let mut physic = PhysicEngineFireworks::with_seed(&PhysicConfig::default(), 100.0, 100.0, 5);
    physic.force_burst_probability(1.0);
    let mut sim = Simulator::new(NullRenderer::default(), physic, unpaced().build()?);

    assert!(sim.step()?);
    assert!(sim.handle().stop());
    sim.run()?;

    assert_eq!(sim.frames(), 1);
    assert_eq!(sim.bursts(), 1);
    assert!(sim.physic_engine().particles_count() > 0);
    Ok(())
}

#[test]
fn test_renderer_error_triggers_proper_cleanup() -> anyhow::Result<()> {
    let log = Rc::new(RefCell::new(vec![]));
    let mut renderer = TestRenderer::new(log.clone());
    renderer.fail_on_render = true; // Simulation d'erreur

    let mut sim = Simulator::new(renderer, TestPhysic::new(log.clone()), unpaced().build()?);

    let run_result = sim.run();
    assert!(run_result.is_err(), "Expected renderer to fail");

    // Même en cas d’erreur, on appelle `close()` explicitement
    sim.close();

    assert_eq!(
        *log.borrow(),
        vec![
            "renderer.set_viewport 800x600",
            "physic.tick",
            "renderer.render_frame",
            "renderer.close",
            "physic.close",
        ]
    );
    assert_eq!(sim.frames(), 0);
    Ok(())
}

#[test]
fn test_profiler_records_frame_metrics() -> anyhow::Result<()> {
    let physic = PhysicEngineFireworks::with_seed(&PhysicConfig::default(), 800.0, 600.0, 9);
    let mut sim = Simulator::new(
        NullRenderer::default(),
        physic,
        unpaced().max_frames(10).build()?,
    );
    sim.run()?;

    let summary = sim.profiler().summary();
    assert!(summary.contains_key("physic - tick"));
    assert!(summary.contains_key("render frame"));
    assert_eq!(sim.profiler().total_frames(), 10);
    assert!(sim.profiler().metric_summary("live particles").is_some());
    Ok(())
}
