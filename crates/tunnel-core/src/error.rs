use thiserror::Error;

/// Rejected construction-time configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("shape sequence is empty")]
    EmptyShapeSequence,
    #[error("shape `{label}` has {side_count} sides; at least 3 are required")]
    TooFewSides { label: String, side_count: u32 },
    #[error("shape sequence must end with the shape it starts with (first `{first}`, last `{last}`)")]
    OpenShapeLoop { first: String, last: String },
    #[error("palette list is empty")]
    EmptyPaletteSet,
    #[error("palette `{name}` has {stops} stops; at least 2 are required")]
    TooFewStops { name: String, stops: usize },
    #[error("palette `{name}` must start with a black stop")]
    MissingBlackStop { name: String },
    #[error("palette `{name}` has {stops} stops but the set uses {expected}")]
    StopCountMismatch {
        name: String,
        stops: usize,
        expected: usize,
    },
    #[error("`{field}` must be positive and finite (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("palette transition window {window}s exceeds the {cycle}s cycle")]
    TransitionTooLong { window: f32, cycle: f32 },
    #[error("ring count must be at least 1")]
    NoRings,
}

/// Failure reported by an outbound collaborator signal. Always non-fatal to
/// the tunnel: the engine logs it and carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HookError {
    #[error("{subsystem} rejected `{signal}`: {reason}")]
    Rejected {
        subsystem: &'static str,
        signal: &'static str,
        reason: String,
    },
    #[error("{subsystem} is no longer available")]
    Unavailable { subsystem: &'static str },
}

/// Failure inside the renderer boundary while presenting one frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("render surface lost")]
    SurfaceLost,
    #[error("render backend error: {0}")]
    Backend(String),
}

pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
