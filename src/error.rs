use thiserror::Error;

/// Top-level error type for the foundation section engine.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while validating a foundation configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("parameter {parameter} = {value} must be {requirement}")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error(
        "unsupported foundation configuration (plate={plate}, surface={surface}, \
         ratchetting={ratchetting}, fill={fill})"
    )]
    Unsupported {
        plate: bool,
        surface: bool,
        ratchetting: bool,
        fill: bool,
    },
}

/// Errors raised while building section polygons.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("degenerate polygon: {0}")]
    DegeneratePolygon(String),

    #[error("polygon centroid at z = {z} lies below the deepest {family} boundary")]
    UnclassifiedPolygon { family: &'static str, z: f64 },
}

/// Convenience type alias for results using [`SectionError`].
pub type Result<T> = std::result::Result<T, SectionError>;
