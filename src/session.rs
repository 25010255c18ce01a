//! Training session facade
//!
//! Ties one scheduler and one encoder to a shared session lifecycle. The two
//! stay uncoupled: prompts play out on the scheduler's clock while frames are
//! encoded as the sensor pipeline delivers them. The facade also carries the
//! participant id and the sample-file names derived from it; writing those
//! files is the storage collaborator's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::GestureCatalog;
use crate::config::SessionConfig;
use crate::descriptor::DescriptorExtractor;
use crate::encoder::FeatureEncoder;
use crate::error::TrainError;
use crate::scheduler::SessionScheduler;
use crate::types::TrackingFrame;

/// Ground-truth file name pattern, filled with the participant id
pub const GROUND_TRUTH_PATTERN: &str = "KinectDataGTD_{}.txt";
/// Raw sample file name pattern, filled with the participant id
pub const DATA_PATTERN: &str = "KinectData_{}.bin";

/// Serializable description of a session, for labeling recorded output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub trainer_version: String,
    pub pid: String,
    pub started_at: DateTime<Utc>,
    pub gesture_count: usize,
    pub repetitions: u32,
    pub show_rest: bool,
}

/// One training session: scheduler, encoder, and identity
#[derive(Debug)]
pub struct TrainingSession<E: DescriptorExtractor> {
    session_id: Uuid,
    pid: String,
    started_at: DateTime<Utc>,
    catalog: GestureCatalog,
    scheduler: SessionScheduler,
    encoder: FeatureEncoder<E>,
}

impl<E: DescriptorExtractor> TrainingSession<E> {
    /// Load the catalog named by the configuration and build a session
    pub fn new(config: &SessionConfig, extractor: E) -> Result<Self, TrainError> {
        let catalog = GestureCatalog::load(&config.gesture_def)?;
        Ok(Self::with_catalog(catalog, config, extractor))
    }

    /// Build a session around an already-loaded catalog
    pub fn with_catalog(catalog: GestureCatalog, config: &SessionConfig, extractor: E) -> Self {
        let scheduler = SessionScheduler::new(catalog.clone(), config);
        Self {
            session_id: Uuid::new_v4(),
            pid: config.pid.clone(),
            started_at: Utc::now(),
            catalog,
            scheduler,
            encoder: FeatureEncoder::new(extractor),
        }
    }

    /// Deterministic variant: scheduler shuffle and wait draws use `seed`
    pub fn with_catalog_seeded(
        catalog: GestureCatalog,
        config: &SessionConfig,
        extractor: E,
        seed: u64,
    ) -> Self {
        let scheduler = SessionScheduler::with_seed(catalog.clone(), config, seed);
        Self {
            session_id: Uuid::new_v4(),
            pid: config.pid.clone(),
            started_at: Utc::now(),
            catalog,
            scheduler,
            encoder: FeatureEncoder::new(extractor),
        }
    }

    /// Encode one tracked frame into a feature vector, if it carries motion
    pub fn encode_frame(&mut self, frame: &TrackingFrame) -> Result<Option<Vec<f32>>, TrainError> {
        self.encoder.compute(frame)
    }

    pub fn scheduler_mut(&mut self) -> &mut SessionScheduler {
        &mut self.scheduler
    }

    pub fn catalog(&self) -> &GestureCatalog {
        &self.catalog
    }

    pub fn pid(&self) -> &str {
        &self.pid
    }

    pub fn session_id(&self) -> String {
        self.session_id.to_string()
    }

    /// Ground-truth label file name for this participant
    pub fn ground_truth_file_name(&self) -> String {
        GROUND_TRUTH_PATTERN.replacen("{}", &self.pid, 1)
    }

    /// Raw sample file name for this participant
    pub fn data_file_name(&self) -> String {
        DATA_PATTERN.replacen("{}", &self.pid, 1)
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.session_id(),
            trainer_version: crate::TRAINER_VERSION.to_string(),
            pid: self.pid.clone(),
            started_at: self.started_at,
            gesture_count: self.catalog.len(),
            repetitions: self.scheduler_repetitions(),
            show_rest: self.scheduler_show_rest(),
        }
    }

    /// Session description as JSON, for tagging recorded output
    pub fn info_json(&self) -> Result<String, TrainError> {
        serde_json::to_string_pretty(&self.info()).map_err(|e| TrainError::InvalidConfig {
            key: "session_info".to_string(),
            reason: e.to_string(),
        })
    }

    fn scheduler_repetitions(&self) -> u32 {
        self.scheduler.repetitions()
    }

    fn scheduler_show_rest(&self) -> bool {
        self.scheduler.show_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ResampleExtractor;
    use crate::types::{Region, RelPos, FEATURE_LEN};
    use image::GrayImage;

    fn config() -> SessionConfig {
        SessionConfig::new("gestures.csv", 5000)
            .unwrap()
            .with_pid("P3")
            .with_repetitions(2)
    }

    fn session() -> TrainingSession<ResampleExtractor> {
        let catalog = GestureCatalog::parse("fist,S\nwave,D\n").unwrap();
        TrainingSession::with_catalog(catalog, &config(), ResampleExtractor::new())
    }

    #[test]
    fn file_names_derive_from_pid() {
        let session = session();
        assert_eq!(session.ground_truth_file_name(), "KinectDataGTD_P3.txt");
        assert_eq!(session.data_file_name(), "KinectData_P3.bin");
    }

    #[test]
    fn encodes_frames_independently_of_scheduling() {
        let mut session = session();
        let frame = TrackingFrame {
            rel_pos: Some(RelPos::new(0.1, 0.2, 0.3)),
            color_image: GrayImage::from_pixel(64, 64, image::Luma([1])),
            color_regions: vec![Region::new(0, 0, 64, 64)],
            depth_image: GrayImage::from_pixel(64, 64, image::Luma([2])),
            depth_regions: vec![Region::new(0, 0, 64, 64)],
        };
        let feature = session.encode_frame(&frame).unwrap().unwrap();
        assert_eq!(feature.len(), FEATURE_LEN);
    }

    #[test]
    fn info_round_trips_as_json() {
        let session = session();
        let json = session.info_json().unwrap();
        let info: SessionInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info.pid, "P3");
        assert_eq!(info.gesture_count, 2);
        assert_eq!(info.repetitions, 2);
        assert!(info.show_rest);
    }

    #[test]
    fn missing_catalog_file_fails_construction() {
        let config = SessionConfig::new("/nonexistent/gestures.csv", 5000).unwrap();
        let err = TrainingSession::new(&config, ResampleExtractor::new()).unwrap_err();
        assert!(matches!(err, TrainError::Io(_)));
    }
}
