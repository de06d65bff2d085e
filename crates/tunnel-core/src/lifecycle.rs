//! FadeIn → Active → FadeOut → Complete, driven purely by elapsed time.

use crate::config::LifecycleConfig;
use crate::constants::SHUTDOWN_BLACKOUT_FRACTION;
use crate::palette::ShutdownOverride;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TunnelPhase {
    FadeIn,
    Active,
    FadeOut,
    Complete,
}

impl TunnelPhase {
    pub fn next(self) -> Option<TunnelPhase> {
        match self {
            TunnelPhase::FadeIn => Some(TunnelPhase::Active),
            TunnelPhase::Active => Some(TunnelPhase::FadeOut),
            TunnelPhase::FadeOut => Some(TunnelPhase::Complete),
            TunnelPhase::Complete => None,
        }
    }

    /// Ring accents only show while the tunnel is on screen.
    pub fn rings_visible(self) -> bool {
        self != TunnelPhase::Complete
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTransition {
    pub from: TunnelPhase,
    pub to: TunnelPhase,
    pub elapsed: f32,
}

/// Per-surface opacity for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Opacity {
    pub outer: f32,
    pub inner: f32,
    pub rings: f32,
}

/// Cubic smoothstep used for the fade-in ramp.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

#[derive(Clone, Debug)]
pub struct Lifecycle {
    config: LifecycleConfig,
    phase: TunnelPhase,
    phase_entered_at: f32,
}

impl Lifecycle {
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            config,
            phase: TunnelPhase::FadeIn,
            phase_entered_at: 0.0,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn phase(&self) -> TunnelPhase {
        self.phase
    }

    pub fn phase_entered_at(&self) -> f32 {
        self.phase_entered_at
    }

    /// Phase implied by elapsed time alone.
    pub fn phase_for(config: &LifecycleConfig, elapsed: f32) -> TunnelPhase {
        let active_at = config.fade_in_sec;
        let fade_out_at = active_at + config.active_sec;
        let complete_at = fade_out_at + config.fade_out_sec;
        if elapsed < active_at {
            TunnelPhase::FadeIn
        } else if elapsed < fade_out_at {
            TunnelPhase::Active
        } else if elapsed < complete_at {
            TunnelPhase::FadeOut
        } else {
            TunnelPhase::Complete
        }
    }

    /// Move forward to the phase implied by `elapsed`, one step at a time so
    /// a long frame never skips a phase. Time going backwards is ignored.
    pub fn advance(&mut self, elapsed: f32) -> SmallVec<[PhaseTransition; 3]> {
        let mut transitions = SmallVec::new();
        let target = Self::phase_for(&self.config, elapsed);
        while self.phase < target {
            let Some(to) = self.phase.next() else {
                break;
            };
            log::info!(
                "[tunnel] phase {:?} -> {:?} at {:.2}s",
                self.phase,
                to,
                elapsed
            );
            transitions.push(PhaseTransition {
                from: self.phase,
                to,
                elapsed,
            });
            self.phase = to;
            self.phase_entered_at = elapsed;
        }
        transitions
    }

    /// Fraction of the fade-out already played, 0 outside FadeOut/Complete.
    pub fn fade_out_progress(&self, elapsed: f32) -> f32 {
        let start = self.config.fade_in_sec + self.config.active_sec;
        match self.phase {
            TunnelPhase::FadeOut => ((elapsed - start) / self.config.fade_out_sec).clamp(0.0, 1.0),
            TunnelPhase::Complete => 1.0,
            _ => 0.0,
        }
    }

    /// Outer-layer opacity: smoothstep in, pinned while Active, linear out.
    pub fn level(&self, elapsed: f32) -> f32 {
        match self.phase {
            TunnelPhase::FadeIn => smoothstep(elapsed / self.config.fade_in_sec),
            TunnelPhase::Active => 1.0,
            TunnelPhase::FadeOut => 1.0 - self.fade_out_progress(elapsed),
            TunnelPhase::Complete => 0.0,
        }
    }

    pub fn opacity(&self, elapsed: f32) -> Opacity {
        let level = self.level(elapsed);
        Opacity {
            outer: level,
            inner: level * self.config.inner_opacity_fraction,
            rings: if self.phase.rings_visible() {
                level * self.config.ring_opacity_fraction
            } else {
                0.0
            },
        }
    }

    /// Set only while fading out; reaches full strength part-way through.
    pub fn shutdown_override(&self, elapsed: f32) -> Option<ShutdownOverride> {
        match self.phase {
            TunnelPhase::FadeOut | TunnelPhase::Complete => Some(ShutdownOverride {
                strength: (self.fade_out_progress(elapsed) / SHUTDOWN_BLACKOUT_FRACTION)
                    .clamp(0.0, 1.0),
            }),
            _ => None,
        }
    }
}
