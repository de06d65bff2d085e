#![cfg(target_arch = "wasm32")]
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tunnel_core::{Collaborators, EngineState, FrameDriver, TunnelConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod hooks;
mod input;
mod render;
mod tick;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tunnel-web loaded");
    Ok(())
}

/// Returned to the page by `start_tunnel`.
#[wasm_bindgen]
pub struct TunnelHandle {
    slot: frame::Slot,
    stopped: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl TunnelHandle {
    /// Tear the tunnel down now. Safe to call repeatedly, before the GPU is
    /// ready, or from inside one of the collaborator callbacks.
    pub fn stop(&self) {
        self.stopped.set(true);
        frame::teardown(&self.slot);
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.slot
            .try_borrow()
            .map(|s| s.as_ref().is_some_and(|c| c.driver.is_active()))
            .unwrap_or(true)
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        match self.slot.try_borrow() {
            Ok(s) => s
                .as_ref()
                .map(|c| format!("{:?}", c.phase()))
                .unwrap_or_else(|| "Complete".to_string()),
            Err(_) => "Busy".to_string(),
        }
    }
}

/// Start the tunnel on `canvas_id` (or the default canvas). The optional
/// callbacks are signalled once, when the tunnel becomes fully visible.
/// `begin_next_sequence` may return a promise; it is not awaited by the
/// tunnel.
#[wasm_bindgen]
pub fn start_tunnel(
    canvas_id: Option<String>,
    dispose_particles: Option<js_sys::Function>,
    cleanup_transient: Option<js_sys::Function>,
    begin_next_sequence: Option<js_sys::Function>,
) -> TunnelHandle {
    let slot: frame::Slot = Rc::new(RefCell::new(None));
    let stopped = Rc::new(Cell::new(false));
    let collaborators =
        hooks::collaborators(dispose_particles, cleanup_transient, begin_next_sequence);
    let canvas_id = canvas_id.unwrap_or_else(|| constants::DEFAULT_CANVAS_ID.to_string());
    {
        let slot = slot.clone();
        let stopped = stopped.clone();
        spawn_local(async move {
            if let Err(e) = init(&canvas_id, collaborators, slot, stopped).await {
                log::error!("init error: {:?}", e);
            }
        });
    }
    TunnelHandle { slot, stopped }
}

async fn init(
    canvas_id: &str,
    collaborators: Collaborators,
    slot: frame::Slot,
    stopped: Rc<Cell<bool>>,
) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{canvas_id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let engine = EngineState::new(TunnelConfig::default(), collaborators)?;
    let resize = dom::wire_canvas_resize(&window, &canvas)?;
    let gpu = render::GpuState::new(&canvas).await?;
    if stopped.get() {
        log::info!("[init] stopped before the first frame");
        canvas.remove();
        return Ok(());
    }

    let pointer = Rc::new(Cell::new(Vec2::from(constants::POINTER_REST)));
    let pointer_move = {
        let pointer = pointer.clone();
        let window_for_ratio = window.clone();
        dom::Listener::new(&window, "pointermove", move |ev: web::Event| {
            if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
                pointer.set(input::pointer_viewport_ratio(ev, &window_for_ratio));
            }
        })?
    };

    *slot.borrow_mut() = Some(frame::FrameContext {
        driver: FrameDriver::new(engine, Instant::now()),
        gpu,
        canvas,
        pointer,
        listeners: vec![resize, pointer_move],
        token: None,
        raf_id: None,
        tick: None,
    });
    log::info!("[init] tunnel running");
    frame::start_loop(slot, stopped);
    Ok(())
}
