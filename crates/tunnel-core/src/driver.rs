//! Per-frame orchestration and teardown.
//!
//! The host schedules frames (e.g. `requestAnimationFrame`) and hands each
//! one back with the `FrameToken` it was scheduled under. Destroying the
//! driver bumps the epoch, so any frame that was already queued finds a stale
//! token and exits without touching released state.

use crate::constants::{FIRST_FRAME_DT_SEC, MAX_FRAME_DT_SEC};
use crate::engine::EngineState;
use crate::lifecycle::TunnelPhase;
use crate::render::{Renderer, CLEAR_BLACK};
use glam::Vec2;
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken {
    epoch: u64,
}

impl FrameToken {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame rendered; the host should schedule another.
    Continue,
    /// The tunnel finished and tore itself down; schedule nothing.
    Complete,
    /// Token from an older epoch or a destroyed driver; nothing happened.
    Stale,
}

pub struct FrameDriver {
    engine: Option<EngineState>,
    epoch: u64,
    started_at: Instant,
    last_instant: Option<Instant>,
    pending: Option<FrameToken>,
}

impl FrameDriver {
    pub fn new(engine: EngineState, started_at: Instant) -> Self {
        Self {
            engine: Some(engine),
            epoch: 0,
            started_at,
            last_instant: None,
            pending: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&EngineState> {
        self.engine.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The frame currently expected back from the host, if any.
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Issue a token for the next frame. `None` once torn down.
    pub fn schedule(&mut self) -> Option<FrameToken> {
        if !self.is_active() {
            return None;
        }
        let token = FrameToken { epoch: self.epoch };
        self.pending = Some(token);
        Some(token)
    }

    pub fn tick<R: Renderer + ?Sized>(
        &mut self,
        token: FrameToken,
        now: Instant,
        pointer: Vec2,
        renderer: &mut R,
    ) -> TickOutcome {
        if token.epoch != self.epoch {
            log::debug!(
                "[driver] dropping frame from epoch {} (current {})",
                token.epoch,
                self.epoch
            );
            return TickOutcome::Stale;
        }
        let Some(engine) = self.engine.as_mut() else {
            return TickOutcome::Stale;
        };
        if self.pending == Some(token) {
            self.pending = None;
        }

        let dt_sec = match self.last_instant {
            Some(last) if now > last => (now - last).as_secs_f32().min(MAX_FRAME_DT_SEC),
            Some(_) => 0.0,
            None => FIRST_FRAME_DT_SEC,
        };
        self.last_instant = Some(now);
        let elapsed = if now > self.started_at {
            now - self.started_at
        } else {
            Duration::ZERO
        };

        let phase = engine.step(elapsed.as_secs_f32(), dt_sec, pointer);
        if phase == TunnelPhase::Complete {
            log::info!("[driver] tunnel complete after {:.2}s", elapsed.as_secs_f32());
            self.destroy(renderer);
            return TickOutcome::Complete;
        }
        renderer.set_camera(engine.camera());
        if let Err(e) = renderer.submit(&engine.submission()) {
            log::error!("render error: {e}");
        }
        TickOutcome::Continue
    }

    /// Idempotent teardown: forces an opaque black background, invalidates
    /// every outstanding token and releases all engine-owned buffers. The
    /// renderer itself is borrowed and left alone.
    pub fn destroy<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let Some(engine) = self.engine.take() else {
            return;
        };
        self.epoch += 1;
        self.pending = None;
        renderer.set_clear_color(CLEAR_BLACK);
        log::info!(
            "[driver] destroyed in {:?} at {:.2}s (epoch now {})",
            engine.phase(),
            engine.elapsed(),
            self.epoch
        );
        drop(engine);
    }
}
