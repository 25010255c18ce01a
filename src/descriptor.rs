//! Image descriptor extraction
//!
//! A descriptor is a fixed-size single-channel float grid derived from a
//! cropped image region. The trait keeps the resampling algorithm swappable;
//! the contract is only that the output is deterministic and always
//! `DESCRIPTOR_WIDTH` squared.

use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::error::TrainError;
use crate::types::{Region, DESCRIPTOR_AREA, DESCRIPTOR_WIDTH};

/// A `DESCRIPTOR_WIDTH` x `DESCRIPTOR_WIDTH` single-channel float grid,
/// row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    values: Vec<f32>,
}

impl Descriptor {
    /// Wrap raw values; panics unless exactly [`DESCRIPTOR_AREA`] long.
    /// Intended for extractor implementations.
    pub fn from_values(values: Vec<f32>) -> Self {
        assert_eq!(values.len(), DESCRIPTOR_AREA, "descriptor size mismatch");
        Self { values }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// Converts a cropped image region into a fixed-size descriptor grid
pub trait DescriptorExtractor {
    /// Extract the descriptor for `region` of `image`
    ///
    /// Deterministic: the same image and region always produce the same grid.
    fn extract(&mut self, image: &GrayImage, region: Region) -> Result<Descriptor, TrainError>;
}

/// Default extractor: crop, bilinear-resample to the fixed grid size, and
/// widen each sample to `f32` verbatim
///
/// Allocates its output per call, so instances carry no mutable scratch state
/// and calls need no external serialization.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResampleExtractor;

impl ResampleExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorExtractor for ResampleExtractor {
    fn extract(&mut self, image: &GrayImage, region: Region) -> Result<Descriptor, TrainError> {
        if !region.fits(image.width(), image.height()) {
            return Err(TrainError::InvalidRegion {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                image_width: image.width(),
                image_height: image.height(),
            });
        }
        let cropped = imageops::crop_imm(image, region.x, region.y, region.width, region.height)
            .to_image();
        let scaled = imageops::resize(
            &cropped,
            DESCRIPTOR_WIDTH as u32,
            DESCRIPTOR_WIDTH as u32,
            FilterType::Triangle,
        );
        let values = scaled.pixels().map(|p| f32::from(p.0[0])).collect();
        Ok(Descriptor::from_values(values))
    }
}
