//! Capability interfaces for the subsystems the tunnel signals when it
//! becomes Active. Collaborators are injected at construction; a missing one
//! is `None`, never a runtime shape check.

use crate::error::HookError;

/// Something the tunnel can ask to release itself (the background particles).
pub trait Disposable {
    fn dispose(&mut self) -> Result<(), HookError>;
}

/// The scene orchestrator that owns the visuals around the tunnel.
pub trait SceneOrchestrator {
    /// Remove transient objects left over from the previous sequence.
    fn cleanup_transient(&mut self) -> Result<(), HookError>;

    /// Kick off the next visual sequence. Implementations start the work and
    /// return; the tunnel never waits for it to finish.
    fn begin_next_sequence(&mut self) -> Result<(), HookError>;
}

#[derive(Default)]
pub struct Collaborators {
    pub particles: Option<Box<dyn Disposable>>,
    pub orchestrator: Option<Box<dyn SceneOrchestrator>>,
}

impl Collaborators {
    pub fn new(
        particles: Option<Box<dyn Disposable>>,
        orchestrator: Option<Box<dyn SceneOrchestrator>>,
    ) -> Self {
        Self {
            particles,
            orchestrator,
        }
    }

    /// The one-time handoff on entering Active. Every failure is logged and
    /// swallowed; the remaining signals still go out.
    pub fn signal_active(&mut self) {
        if let Some(particles) = self.particles.as_mut() {
            if let Err(e) = particles.dispose() {
                log::warn!("[tunnel] particle dispose failed: {e}");
            }
        }
        if let Some(orchestrator) = self.orchestrator.as_mut() {
            if let Err(e) = orchestrator.cleanup_transient() {
                log::warn!("[tunnel] transient cleanup failed: {e}");
            }
            if let Err(e) = orchestrator.begin_next_sequence() {
                log::warn!("[tunnel] next sequence handoff failed: {e}");
            }
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("particles", &self.particles.is_some())
            .field("orchestrator", &self.orchestrator.is_some())
            .finish()
    }
}
