//! Core types for gesture training sessions
//!
//! This module defines the data structures shared between the session
//! scheduler and the feature encoder: catalog entries, training events,
//! tracking frames, and the fixed feature-vector layout.

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Side length of the square descriptor grid extracted from each image channel
pub const DESCRIPTOR_WIDTH: usize = 64;

/// Number of values in one descriptor grid
pub const DESCRIPTOR_AREA: usize = DESCRIPTOR_WIDTH * DESCRIPTOR_WIDTH;

/// Number of motion values at the head of every feature vector
pub const MOTION_LEN: usize = 3;

/// Total length of a feature vector: motion plus color and depth descriptors
pub const FEATURE_LEN: usize = MOTION_LEN + 2 * DESCRIPTOR_AREA;

/// Catalog kind tag marking a static gesture
pub const STATIC_KIND: &str = "S";

/// One record of the gesture catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureCatalogEntry {
    /// Unique gesture label shown to the participant
    pub label: String,
    /// Category tag; `"S"` = static, anything else = dynamic
    pub kind: String,
}

impl GestureCatalogEntry {
    pub fn is_static(&self) -> bool {
        self.kind == STATIC_KIND
    }
}

/// Kind of event emitted over the course of a training session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingEventKind {
    /// Session has begun; recording may start
    Start,
    /// A gesture prompt is now being shown
    StartGesture,
    /// All prompts exhausted; session is over
    End,
    /// Declared upstream but never emitted by the scheduler
    StopPostStroke,
}

/// A notification delivered to session observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingEvent {
    pub kind: TrainingEventKind,
    /// Gesture label, present only for [`TrainingEventKind::StartGesture`]
    pub label: Option<String>,
}

impl TrainingEvent {
    pub fn new(kind: TrainingEventKind) -> Self {
        Self { kind, label: None }
    }

    pub fn gesture(label: impl Into<String>) -> Self {
        Self {
            kind: TrainingEventKind::StartGesture,
            label: Some(label.into()),
        }
    }
}

/// Scheduler phase a wait time is drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A gesture prompt is about to be shown
    Trial,
    /// The fixed-length rest pause between prompts
    Rest,
}

/// Relative 3-D position of the tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RelPos {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned crop rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the region lies fully inside an image of the given dimensions
    pub fn fits(&self, image_width: u32, image_height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.saturating_add(self.width) <= image_width
            && self.y.saturating_add(self.height) <= image_height
    }
}

/// One tracked frame delivered by the upstream sensor pipeline
///
/// The last region of each list is the most recent tracker estimate and the
/// one used for descriptor extraction.
#[derive(Debug, Clone)]
pub struct TrackingFrame {
    /// Relative hand position; absent when tracking was lost for this frame
    pub rel_pos: Option<RelPos>,
    pub color_image: GrayImage,
    pub color_regions: Vec<Region>,
    pub depth_image: GrayImage,
    pub depth_regions: Vec<Region>,
}
