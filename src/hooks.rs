//! JavaScript-backed collaborators. The page hands plain functions to
//! `start_tunnel`; each one is wrapped in the matching core capability.

use js_sys::{Function, Promise};
use tunnel_core::{Collaborators, Disposable, HookError, SceneOrchestrator};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

fn call(
    subsystem: &'static str,
    signal: &'static str,
    f: &Function,
) -> Result<JsValue, HookError> {
    f.call0(&JsValue::NULL).map_err(|e| HookError::Rejected {
        subsystem,
        signal,
        reason: format!("{:?}", e),
    })
}

pub struct JsParticles {
    dispose: Function,
}

impl Disposable for JsParticles {
    fn dispose(&mut self) -> Result<(), HookError> {
        call("particles", "dispose", &self.dispose).map(|_| ())
    }
}

pub struct JsOrchestrator {
    cleanup_transient: Option<Function>,
    begin_next_sequence: Option<Function>,
}

impl SceneOrchestrator for JsOrchestrator {
    fn cleanup_transient(&mut self) -> Result<(), HookError> {
        match &self.cleanup_transient {
            Some(f) => call("orchestrator", "cleanup_transient", f).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Fire and forget: a returned promise is awaited off the frame and its
    /// rejection only logged.
    fn begin_next_sequence(&mut self) -> Result<(), HookError> {
        let Some(f) = &self.begin_next_sequence else {
            return Ok(());
        };
        let value = call("orchestrator", "begin_next_sequence", f)?;
        if let Ok(promise) = value.dyn_into::<Promise>() {
            spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => log::info!("[hooks] next sequence started"),
                    Err(e) => log::warn!("[hooks] next sequence failed: {:?}", e),
                }
            });
        }
        Ok(())
    }
}

pub fn collaborators(
    dispose_particles: Option<Function>,
    cleanup_transient: Option<Function>,
    begin_next_sequence: Option<Function>,
) -> Collaborators {
    let particles = dispose_particles
        .map(|dispose| Box::new(JsParticles { dispose }) as Box<dyn Disposable>);
    let orchestrator = (cleanup_transient.is_some() || begin_next_sequence.is_some()).then(|| {
        Box::new(JsOrchestrator {
            cleanup_transient,
            begin_next_sequence,
        }) as Box<dyn SceneOrchestrator>
    });
    Collaborators::new(particles, orchestrator)
}
