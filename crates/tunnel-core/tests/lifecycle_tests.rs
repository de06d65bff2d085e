// Phase boundaries, opacity ramps and the one-time Active handoff.

use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use tunnel_core::{
    Collaborators, Disposable, EngineState, HookError, Lifecycle, LifecycleConfig,
    Opacity, SceneOrchestrator, TunnelConfig, TunnelPhase,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct CountingParticles {
    disposed: Rc<Cell<u32>>,
    fail: bool,
}

impl Disposable for CountingParticles {
    fn dispose(&mut self) -> Result<(), HookError> {
        self.disposed.set(self.disposed.get() + 1);
        if self.fail {
            return Err(HookError::Unavailable {
                subsystem: "particles",
            });
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
struct OrchestratorCounts {
    cleanups: Rc<Cell<u32>>,
    sequences: Rc<Cell<u32>>,
}

struct CountingOrchestrator {
    counts: OrchestratorCounts,
    fail_cleanup: bool,
}

impl SceneOrchestrator for CountingOrchestrator {
    fn cleanup_transient(&mut self) -> Result<(), HookError> {
        self.counts.cleanups.set(self.counts.cleanups.get() + 1);
        if self.fail_cleanup {
            return Err(HookError::Rejected {
                subsystem: "orchestrator",
                signal: "cleanup_transient",
                reason: "scene busy".into(),
            });
        }
        Ok(())
    }

    fn begin_next_sequence(&mut self) -> Result<(), HookError> {
        self.counts.sequences.set(self.counts.sequences.get() + 1);
        Ok(())
    }
}

fn engine_with_hooks(
    fail_particles: bool,
    fail_cleanup: bool,
) -> (EngineState, Rc<Cell<u32>>, OrchestratorCounts) {
    let disposed = Rc::new(Cell::new(0));
    let counts = OrchestratorCounts::default();
    let collaborators = Collaborators::new(
        Some(Box::new(CountingParticles {
            disposed: disposed.clone(),
            fail: fail_particles,
        })),
        Some(Box::new(CountingOrchestrator {
            counts: counts.clone(),
            fail_cleanup,
        })),
    );
    let engine = EngineState::new(TunnelConfig::default(), collaborators).unwrap();
    (engine, disposed, counts)
}

#[test]
fn phase_boundaries_for_default_durations() {
    let cfg = LifecycleConfig::default();
    assert_eq!((cfg.fade_in_sec, cfg.active_sec, cfg.fade_out_sec), (3.0, 5.0, 2.0));
    let cases = [
        (0.0, TunnelPhase::FadeIn),
        (2.9, TunnelPhase::FadeIn),
        (3.0, TunnelPhase::Active),
        (3.1, TunnelPhase::Active),
        (7.9, TunnelPhase::Active),
        (8.1, TunnelPhase::FadeOut),
        (10.1, TunnelPhase::Complete),
    ];
    for (elapsed, expected) in cases {
        let mut lc = Lifecycle::new(cfg.clone());
        lc.advance(elapsed);
        assert_eq!(lc.phase(), expected, "at {elapsed}s");
    }
}

#[test]
fn advance_steps_through_every_phase_in_order() {
    init_logging();
    let mut lc = Lifecycle::new(LifecycleConfig::default());
    let transitions = lc.advance(10.1);
    let seen: Vec<_> = transitions.iter().map(|t| (t.from, t.to)).collect();
    assert_eq!(
        seen,
        vec![
            (TunnelPhase::FadeIn, TunnelPhase::Active),
            (TunnelPhase::Active, TunnelPhase::FadeOut),
            (TunnelPhase::FadeOut, TunnelPhase::Complete),
        ]
    );
    assert!(lc.advance(4.0).is_empty(), "time going backwards moved the phase");
    assert_eq!(lc.phase(), TunnelPhase::Complete);
}

#[test]
fn opacity_ramps_and_layer_fractions() {
    let mut lc = Lifecycle::new(LifecycleConfig::default());
    lc.advance(0.0);
    assert_eq!(lc.opacity(0.0).outer, 0.0);
    lc.advance(1.5);
    let o = lc.opacity(1.5);
    assert!((o.outer - 0.5).abs() < 1e-5);
    assert!((o.inner - 0.4).abs() < 1e-5);
    assert!((o.rings - 0.3).abs() < 1e-5);
    lc.advance(5.0);
    let o = lc.opacity(5.0);
    assert_eq!(o.outer, 1.0);
    assert!((o.inner - 0.8).abs() < 1e-6);
    assert!((o.rings - 0.6).abs() < 1e-6);
    lc.advance(9.0);
    assert!((lc.opacity(9.0).outer - 0.5).abs() < 1e-5);
    lc.advance(11.0);
    assert_eq!(lc.opacity(11.0), Opacity::default());
}

#[test]
fn fade_in_opacity_never_decreases() {
    let mut lc = Lifecycle::new(LifecycleConfig::default());
    let mut prev = 0.0;
    for i in 0..=30 {
        let t = i as f32 * 0.1;
        lc.advance(t);
        let o = lc.opacity(t).outer;
        assert!(o + 1e-6 >= prev);
        prev = o;
    }
}

#[test]
fn shutdown_override_only_while_fading_out() {
    let mut lc = Lifecycle::new(LifecycleConfig::default());
    lc.advance(7.9);
    assert!(lc.shutdown_override(7.9).is_none());
    lc.advance(8.5);
    let s = lc.shutdown_override(8.5).unwrap();
    assert!((s.strength - 0.5).abs() < 1e-4);
    lc.advance(9.0);
    assert!((lc.shutdown_override(9.0).unwrap().strength - 1.0).abs() < 1e-5);
    lc.advance(9.5);
    assert_eq!(lc.shutdown_override(9.5).unwrap().strength, 1.0);
}

#[test]
fn active_hooks_fire_exactly_once() {
    init_logging();
    let (mut engine, disposed, counts) = engine_with_hooks(false, false);
    let mut t = 0.0;
    while t < 10.5 {
        engine.step(t, 1.0 / 30.0, Vec2::splat(0.5));
        if t < 3.0 {
            assert_eq!(disposed.get(), 0, "fired early at {t}s");
        }
        t += 1.0 / 30.0;
    }
    assert_eq!(engine.phase(), TunnelPhase::Complete);
    assert_eq!(disposed.get(), 1);
    assert_eq!(counts.cleanups.get(), 1);
    assert_eq!(counts.sequences.get(), 1);
    assert_eq!(engine.handoff_count(), 1);
}

#[test]
fn hooks_fire_even_when_a_frame_skips_past_active() {
    let (mut engine, disposed, counts) = engine_with_hooks(false, false);
    engine.step(0.5, 0.016, Vec2::splat(0.5));
    engine.step(9.0, 0.1, Vec2::splat(0.5));
    assert_eq!(engine.phase(), TunnelPhase::FadeOut);
    assert_eq!(disposed.get(), 1);
    assert_eq!(counts.sequences.get(), 1);
}

#[test]
fn failing_hooks_do_not_stop_the_tunnel() {
    init_logging();
    let (mut engine, disposed, counts) = engine_with_hooks(true, true);
    engine.step(3.5, 0.016, Vec2::splat(0.5));
    assert_eq!(engine.phase(), TunnelPhase::Active);
    assert_eq!(disposed.get(), 1);
    assert_eq!(counts.cleanups.get(), 1);
    assert_eq!(counts.sequences.get(), 1, "later signals were skipped");
    engine.step(4.0, 0.016, Vec2::splat(0.5));
    assert_eq!(disposed.get(), 1);
    assert_eq!(engine.opacity().outer, 1.0);
}

#[test]
fn missing_collaborators_are_fine() {
    let mut engine = EngineState::new(TunnelConfig::default(), Collaborators::default()).unwrap();
    engine.step(3.5, 0.016, Vec2::splat(0.5));
    assert_eq!(engine.phase(), TunnelPhase::Active);
    assert_eq!(engine.handoff_count(), 1);
}

#[test]
fn custom_durations_shift_the_boundaries() {
    let cfg = LifecycleConfig {
        fade_in_sec: 1.0,
        active_sec: 1.0,
        fade_out_sec: 1.0,
        ..LifecycleConfig::default()
    };
    assert_eq!(cfg.total_sec(), 3.0);
    assert_eq!(Lifecycle::phase_for(&cfg, 0.99), TunnelPhase::FadeIn);
    assert_eq!(Lifecycle::phase_for(&cfg, 1.5), TunnelPhase::Active);
    assert_eq!(Lifecycle::phase_for(&cfg, 2.5), TunnelPhase::FadeOut);
    assert_eq!(Lifecycle::phase_for(&cfg, 3.0), TunnelPhase::Complete);
}
