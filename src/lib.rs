//! Gesture Trainer - labeled sample collection for gesture classifiers
//!
//! Two deterministic contracts feed downstream training: a tick-driven
//! session scheduler that sequences randomized, repetition-exact gesture
//! prompts, and a feature encoder that flattens a 3-D motion signal plus two
//! fixed-size image descriptors into one numeric vector per tracked frame.
//!
//! ## Modules
//!
//! - **Scheduling**: [`sequencer`], [`wait`], and [`scheduler`] drive the
//!   timed prompt stream for one session
//! - **Encoding**: [`descriptor`] and [`encoder`] turn tracked frames into
//!   fixed-length feature vectors

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod encoder;
pub mod error;
pub mod scheduler;
pub mod sequencer;
pub mod session;
pub mod types;
pub mod wait;

pub use catalog::GestureCatalog;
pub use config::SessionConfig;
pub use descriptor::{Descriptor, DescriptorExtractor, ResampleExtractor};
pub use encoder::FeatureEncoder;
pub use error::TrainError;
pub use scheduler::{
    run_session, ChannelObserver, SchedulerState, SessionObserver, SessionScheduler,
    SessionUpdate,
};
pub use sequencer::StimulusSequencer;
pub use session::TrainingSession;
pub use types::{TrainingEvent, TrainingEventKind};
pub use wait::WaitTimeGenerator;

/// Crate version embedded in session metadata
pub const TRAINER_VERSION: &str = env!("CARGO_PKG_VERSION");
