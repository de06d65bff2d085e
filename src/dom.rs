use crate::constants::{MAX_DEVICE_PIXEL_RATIO, MIN_SURFACE_PX};
use crate::input;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = input::backing_size(
            rect.width(),
            rect.height(),
            w.device_pixel_ratio(),
            MAX_DEVICE_PIXEL_RATIO,
            MIN_SURFACE_PX,
        );
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
}

/// An event listener the tunnel owns. Dropping it unregisters the callback
/// and frees the closure.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("addEventListener({event}) failed: {:?}", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Keep the canvas backing store in step with its CSS size.
pub fn wire_canvas_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<Listener> {
    sync_canvas_backing_size(canvas);
    let canvas = canvas.clone();
    Listener::new(window, "resize", move |_| sync_canvas_backing_size(&canvas))
}
