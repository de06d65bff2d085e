//! The renderer boundary. The engine hands over borrowed buffers once per
//! frame and never owns or disposes the backend.

use crate::error::RenderError;
use crate::state::Camera;
use glam::Mat4;
use smallvec::SmallVec;

pub const CLEAR_BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// One tube layer as the renderer sees it.
#[derive(Clone, Copy, Debug)]
pub struct LayerDraw<'a> {
    pub label: &'static str,
    pub positions: &'a [[f32; 3]],
    pub colors: &'a [[f32; 3]],
    pub indices: &'a [u32],
    pub opacity: f32,
}

/// One flat ring accent: a static local mesh placed by `transform`.
#[derive(Clone, Copy, Debug)]
pub struct RingDraw<'a> {
    pub positions: &'a [[f32; 3]],
    pub indices: &'a [u32],
    pub transform: Mat4,
    pub color: [f32; 3],
    pub opacity: f32,
}

#[derive(Clone, Debug)]
pub struct FrameSubmission<'a> {
    pub layers: [LayerDraw<'a>; 2],
    /// Empty once the rings are hidden.
    pub rings: SmallVec<[RingDraw<'a>; 4]>,
}

pub trait Renderer {
    fn set_camera(&mut self, camera: &Camera);
    fn set_clear_color(&mut self, rgba: [f32; 4]);
    fn submit(&mut self, frame: &FrameSubmission<'_>) -> Result<(), RenderError>;
}
