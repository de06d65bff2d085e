// Frontend tuning constants. Engine tuning lives in `tunnel_core::constants`.

// DOM wiring
pub const DEFAULT_CANVAS_ID: &str = "tunnel-canvas";

// Pointer ratio reported before the first pointer event arrives
pub const POINTER_REST: [f32; 2] = [0.5, 0.5];

// Renderer draw slots: two tube layers plus the ring accents
pub const TUBE_LAYER_SLOTS: usize = 2;
pub const RING_SLOTS: usize = 4;

// Smallest backing-store size handed to the surface (pixels)
pub const MIN_SURFACE_PX: u32 = 1;

// Upper bound on devicePixelRatio; keeps 3x phones from quadrupling fill cost
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Frames allowed in flight between CPU and GPU
pub const MAX_FRAME_LATENCY: u32 = 2;
