//! Feature encoding
//!
//! Assembles one flat feature vector per tracked frame: the 3-D relative hand
//! position followed by the color and depth descriptors of the most recent
//! bounding regions. The encoder performs placement only; descriptor values
//! are copied into the vector untouched.

use crate::descriptor::DescriptorExtractor;
use crate::error::TrainError;
use crate::types::{TrackingFrame, DESCRIPTOR_AREA, FEATURE_LEN, MOTION_LEN};

/// Per-frame feature assembler
///
/// Every call allocates a fresh output vector, so one encoder instance can be
/// used without serializing callers.
#[derive(Debug)]
pub struct FeatureEncoder<E: DescriptorExtractor> {
    extractor: E,
}

impl<E: DescriptorExtractor> FeatureEncoder<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Encode one tracked frame
    ///
    /// Returns `Ok(None)` when the frame carries no relative position; frames
    /// without motion data produce no sample and that is not a fault. Fails
    /// if either bounding-region list is empty or a region falls outside its
    /// image.
    pub fn compute(&mut self, frame: &TrackingFrame) -> Result<Option<Vec<f32>>, TrainError> {
        let rel_pos = match frame.rel_pos {
            Some(rel_pos) => rel_pos,
            None => return Ok(None),
        };

        let color_region = *frame
            .color_regions
            .last()
            .ok_or(TrainError::MissingRegion("color"))?;
        let depth_region = *frame
            .depth_regions
            .last()
            .ok_or(TrainError::MissingRegion("depth"))?;

        let mut feature = vec![0.0f32; FEATURE_LEN];
        feature[0] = rel_pos.x;
        feature[1] = rel_pos.y;
        feature[2] = rel_pos.z;

        let color = self.extractor.extract(&frame.color_image, color_region)?;
        feature[MOTION_LEN..MOTION_LEN + DESCRIPTOR_AREA].copy_from_slice(color.values());

        let depth = self.extractor.extract(&frame.depth_image, depth_region)?;
        feature[MOTION_LEN + DESCRIPTOR_AREA..].copy_from_slice(depth.values());

        Ok(Some(feature))
    }

    pub fn into_extractor(self) -> E {
        self.extractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Descriptor, ResampleExtractor};
    use crate::types::{Region, RelPos};
    use image::GrayImage;

    /// Extractor returning a constant grid per channel, keyed by region x
    struct StubExtractor;

    impl DescriptorExtractor for StubExtractor {
        fn extract(
            &mut self,
            _image: &GrayImage,
            region: Region,
        ) -> Result<Descriptor, TrainError> {
            Ok(Descriptor::from_values(vec![
                region.x as f32;
                DESCRIPTOR_AREA
            ]))
        }
    }

    fn frame(rel_pos: Option<RelPos>) -> TrackingFrame {
        TrackingFrame {
            rel_pos,
            color_image: GrayImage::from_pixel(100, 100, image::Luma([50])),
            color_regions: vec![Region::new(1, 0, 10, 10), Region::new(2, 0, 20, 20)],
            depth_image: GrayImage::from_pixel(100, 100, image::Luma([80])),
            depth_regions: vec![Region::new(7, 0, 30, 30)],
        }
    }

    #[test]
    fn no_motion_yields_no_vector() {
        let mut encoder = FeatureEncoder::new(StubExtractor);
        assert!(encoder.compute(&frame(None)).unwrap().is_none());
    }

    #[test]
    fn motion_written_verbatim() {
        let mut encoder = FeatureEncoder::new(StubExtractor);
        let feature = encoder
            .compute(&frame(Some(RelPos::new(1.0, 2.0, 3.0))))
            .unwrap()
            .unwrap();
        assert_eq!(feature.len(), FEATURE_LEN);
        assert_eq!(feature.len(), 8195);
        assert_eq!(&feature[..3], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn descriptors_placed_without_transformation() {
        let mut encoder = FeatureEncoder::new(StubExtractor);
        let feature = encoder
            .compute(&frame(Some(RelPos::new(0.0, 0.0, 0.0))))
            .unwrap()
            .unwrap();
        // stub encodes region.x; the last region of each list is used
        assert!(feature[MOTION_LEN..MOTION_LEN + DESCRIPTOR_AREA]
            .iter()
            .all(|v| *v == 2.0));
        assert!(feature[MOTION_LEN + DESCRIPTOR_AREA..]
            .iter()
            .all(|v| *v == 7.0));
    }

    #[test]
    fn missing_color_region_is_an_error() {
        let mut encoder = FeatureEncoder::new(StubExtractor);
        let mut frame = frame(Some(RelPos::new(0.0, 0.0, 0.0)));
        frame.color_regions.clear();
        let err = encoder.compute(&frame).unwrap_err();
        assert!(matches!(err, TrainError::MissingRegion("color")));
    }

    #[test]
    fn missing_depth_region_is_an_error() {
        let mut encoder = FeatureEncoder::new(StubExtractor);
        let mut frame = frame(Some(RelPos::new(0.0, 0.0, 0.0)));
        frame.depth_regions.clear();
        let err = encoder.compute(&frame).unwrap_err();
        assert!(matches!(err, TrainError::MissingRegion("depth")));
    }

    #[test]
    fn sections_match_raw_extractor_output() {
        let mut encoder = FeatureEncoder::new(ResampleExtractor::new());
        let frame = frame(Some(RelPos::new(0.5, -0.5, 1.5)));
        let feature = encoder.compute(&frame).unwrap().unwrap();

        let mut extractor = ResampleExtractor::new();
        let color = extractor
            .extract(&frame.color_image, *frame.color_regions.last().unwrap())
            .unwrap();
        let depth = extractor
            .extract(&frame.depth_image, *frame.depth_regions.last().unwrap())
            .unwrap();
        assert_eq!(
            &feature[MOTION_LEN..MOTION_LEN + DESCRIPTOR_AREA],
            color.values()
        );
        assert_eq!(&feature[MOTION_LEN + DESCRIPTOR_AREA..], depth.values());
    }

    #[test]
    fn length_constant_across_calls() {
        let mut encoder = FeatureEncoder::new(StubExtractor);
        for _ in 0..3 {
            let feature = encoder
                .compute(&frame(Some(RelPos::new(0.1, 0.2, 0.3))))
                .unwrap()
                .unwrap();
            assert_eq!(feature.len(), FEATURE_LEN);
        }
    }
}
