//! Platform-agnostic core of the tunnel transition: centerline, shape
//! sequence, tube geometry, palettes, lifecycle and frame driver. No web or
//! GPU dependency lives here; the frontend plugs in through [`Renderer`] and
//! the collaborator traits in [`hooks`].

pub mod config;
pub mod constants;
pub mod driver;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hooks;
pub mod lifecycle;
pub mod noise;
pub mod palette;
pub mod path;
pub mod render;
pub mod rings;
pub mod shapes;
pub mod state;

pub use config::*;
pub use driver::{FrameDriver, FrameToken, TickOutcome};
pub use engine::EngineState;
pub use error::{ConfigError, HookError, RenderError};
pub use geometry::{LayerKind, TubeLayer};
pub use hooks::{Collaborators, Disposable, SceneOrchestrator};
pub use lifecycle::{Lifecycle, Opacity, PhaseTransition, TunnelPhase};
pub use palette::{Hsl, Palette, PaletteSet, ShutdownOverride};
pub use path::{Curve, PathModel};
pub use render::{FrameSubmission, LayerDraw, Renderer, RingDraw};
pub use rings::RingSet;
pub use shapes::{ShapeDescriptor, ShapeSample, ShapeSequence};
pub use state::*;
