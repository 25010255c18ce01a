//! Error types for gesture-trainer

use thiserror::Error;

/// Errors that can occur while configuring or running a training session
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog line {line}: {reason}")]
    CatalogFormat { line: usize, reason: String },

    #[error("Gesture catalog contains no entries")]
    EmptyCatalog,

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("Missing required configuration value: {0}")]
    MissingConfig(String),

    #[error("Training session is already running")]
    AlreadyRunning,

    #[error("No {0} bounding region available for descriptor extraction")]
    MissingRegion(&'static str),

    #[error(
        "Region {x},{y} {width}x{height} does not fit inside a {image_width}x{image_height} image"
    )]
    InvalidRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
}
