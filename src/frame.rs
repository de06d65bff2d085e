use crate::dom::Listener;
use crate::render;
use crate::tick::TickCell;
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tunnel_core::{FrameDriver, FrameToken, TickOutcome, TunnelPhase};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The running tunnel. `None` in the slot means torn down (or not started).
pub type Slot = Rc<RefCell<Option<FrameContext>>>;

type Tick = TickCell<Closure<dyn FnMut()>>;

pub struct FrameContext {
    pub driver: FrameDriver,
    pub gpu: render::GpuState,
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<Cell<Vec2>>,
    pub listeners: Vec<Listener>,
    pub token: Option<FrameToken>,
    pub raf_id: Option<i32>,
    /// The RAF callback; cleared on teardown so the closure can be freed.
    pub tick: Option<Tick>,
}

impl FrameContext {
    /// Run one frame. Returns `false` once nothing further should be
    /// scheduled.
    pub fn frame(&mut self) -> bool {
        self.raf_id = None;
        let Some(token) = self.token.take() else {
            return false;
        };
        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        let pointer = self.pointer.get();
        match self
            .driver
            .tick(token, Instant::now(), pointer, &mut self.gpu)
        {
            TickOutcome::Continue => true,
            TickOutcome::Complete | TickOutcome::Stale => false,
        }
    }

    pub fn phase(&self) -> TunnelPhase {
        self.driver
            .engine()
            .map(|e| e.phase())
            .unwrap_or(TunnelPhase::Complete)
    }

    fn shutdown(mut self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.driver.destroy(&mut self.gpu);
        self.gpu.present_clear();
        self.listeners.clear();
        if let Some(tick) = self.tick.take() {
            tick.clear();
        }
        self.canvas.remove();
        log::info!("[frame] tunnel torn down");
    }
}

/// Idempotent. If a frame is running right now (a collaborator called back
/// into `stop`), `stopped` is already set and the loop tears down after the
/// frame returns.
pub fn teardown(slot: &Slot) {
    let ctx = match slot.try_borrow_mut() {
        Ok(mut guard) => guard.take(),
        Err(_) => return,
    };
    if let Some(ctx) = ctx {
        ctx.shutdown();
    }
}

pub fn start_loop(slot: Slot, stopped: Rc<Cell<bool>>) {
    let tick: Tick = TickCell::new();
    let tick_clone = tick.clone();
    let slot_tick = slot.clone();
    tick.set(Closure::wrap(Box::new(move || {
        let keep_going = match slot_tick.borrow_mut().as_mut() {
            Some(ctx) => ctx.frame(),
            None => false,
        };
        if !keep_going || stopped.get() {
            teardown(&slot_tick);
            // Break the closure's reference to itself so it can be freed.
            tick_clone.clear();
            return;
        }
        if let Some(ctx) = slot_tick.borrow_mut().as_mut() {
            schedule(ctx, &tick_clone);
        }
    }) as Box<dyn FnMut()>));
    match slot.borrow_mut().as_mut() {
        Some(ctx) => {
            ctx.tick = Some(tick.clone());
            schedule(ctx, &tick);
        }
        None => {
            tick.clear();
        }
    }
}

fn schedule(ctx: &mut FrameContext, tick: &Tick) {
    ctx.token = ctx.driver.schedule();
    if ctx.token.is_none() {
        return;
    }
    let Some(w) = web::window() else {
        return;
    };
    ctx.raf_id = tick
        .with(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()))
        .and_then(|r| {
            r.map_err(|e| log::error!("[frame] requestAnimationFrame failed: {:?}", e))
                .ok()
        });
}
