//! Point → body-part resolution over per-region opacity masks.
//!
//! Masks are decoded once at load into [`AlphaBitmap`]s, so a touch only
//! costs a bounding-box check and one byte lookup per region.

use tracing::trace;

use crate::config::HitTestConfig;
use crate::error::{PanduError, Result};
use crate::types::{BodyPart, Point, Rect};

use super::tracker::PartLocator;

/// Something that can say whether a scene point lands on it.
pub trait HitMask: Send + Sync {
    /// Whether `point` (scene coordinates) is a hit.
    fn contains(&self, point: Point) -> bool;
}

/// Rectangular hit region in a parent's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectMask {
    /// Rectangle in the parent's local coordinates.
    pub rect: Rect,
    /// Scene position of the parent's origin.
    pub origin: Point,
}

impl RectMask {
    /// A rectangle already in scene coordinates.
    #[must_use]
    pub fn scene(rect: Rect) -> Self {
        Self {
            rect,
            origin: Point::ZERO,
        }
    }
}

impl HitMask for RectMask {
    fn contains(&self, point: Point) -> bool {
        let (dx, dy) = point.delta_from(self.origin);
        self.rect.contains(Point::new(dx, dy))
    }
}

/// Decoded sprite opacity. Rows are stored top-down, the way image files
/// lay them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaBitmap {
    width: usize,
    height: usize,
    /// One alpha byte per pixel, or `None` for images without alpha.
    alpha: Option<Vec<u8>>,
}

impl AlphaBitmap {
    /// Wrap a plane of alpha bytes.
    ///
    /// # Errors
    /// Returns [`PanduError::InvalidMask`] if `alpha.len() != width * height`.
    pub fn from_alpha(width: usize, height: usize, alpha: Vec<u8>) -> Result<Self> {
        let expected = width * height;
        if alpha.len() != expected {
            return Err(PanduError::InvalidMask {
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            width,
            height,
            alpha: Some(alpha),
        })
    }

    /// Extract the alpha plane from interleaved RGBA8 pixels.
    ///
    /// # Errors
    /// Returns [`PanduError::InvalidMask`] on a length mismatch.
    pub fn from_rgba8(width: usize, height: usize, pixels: &[u8]) -> Result<Self> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(PanduError::InvalidMask {
                expected,
                actual: pixels.len(),
            });
        }
        let alpha = pixels.chunks_exact(4).map(|px| px[3]).collect();
        Ok(Self {
            width,
            height,
            alpha: Some(alpha),
        })
    }

    /// An image without an alpha channel: every in-bounds pixel is opaque.
    ///
    /// # Errors
    /// Returns [`PanduError::InvalidMask`] on a length mismatch.
    pub fn from_rgb8(width: usize, height: usize, pixels: &[u8]) -> Result<Self> {
        let expected = width * height * 3;
        if pixels.len() != expected {
            return Err(PanduError::InvalidMask {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            alpha: None,
        })
    }

    /// Pixel dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Sample at normalized `(u, v)` with a bottom-left origin.
    #[must_use]
    pub fn is_opaque_at(&self, u: f32, v: f32, threshold: u8) -> bool {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return false;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let (x, y_up) = (
            (u * self.width as f32) as usize,
            (v * self.height as f32) as usize,
        );
        if x >= self.width || y_up >= self.height {
            return false;
        }
        let row = self.height - 1 - y_up;
        match &self.alpha {
            None => true,
            Some(alpha) => alpha
                .get(row * self.width + x)
                .is_some_and(|a| *a > threshold),
        }
    }
}

/// A sprite's frame in the scene plus its decoded opacity.
#[derive(Debug, Clone)]
pub struct SpriteMask {
    frame: Rect,
    bitmap: AlphaBitmap,
    threshold: u8,
}

impl SpriteMask {
    /// Build a mask for a sprite drawn into `frame`.
    #[must_use]
    pub fn new(frame: Rect, bitmap: AlphaBitmap, threshold: u8) -> Self {
        Self {
            frame,
            bitmap,
            threshold,
        }
    }

    /// Scene frame of the sprite.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }
}

impl HitMask for SpriteMask {
    fn contains(&self, point: Point) -> bool {
        if !self.frame.contains(point) {
            return false;
        }
        let (u, v) = self.frame.normalize(point);
        self.bitmap.is_opaque_at(u, v, self.threshold)
    }
}

/// Resolves a point to at most one [`BodyPart`], checking regions in
/// [`BodyPart::PRIORITY`] order.
pub struct BodyPartHitTester {
    regions: Vec<(BodyPart, Box<dyn HitMask>)>,
    alpha_threshold: u8,
}

impl Default for BodyPartHitTester {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            alpha_threshold: HitTestConfig::default().alpha_threshold,
        }
    }
}

impl std::fmt::Debug for BodyPartHitTester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<_> = self.regions.iter().map(|(p, _)| *p).collect();
        f.debug_struct("BodyPartHitTester")
            .field("regions", &parts)
            .field("alpha_threshold", &self.alpha_threshold)
            .finish()
    }
}

impl BodyPartHitTester {
    /// A tester with no regions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A tester with the configured mouth rectangle relative to
    /// `body_origin`. Mask regions are added with [`Self::with_region`].
    #[must_use]
    pub fn from_config(config: &HitTestConfig, body_origin: Point) -> Self {
        let tester = Self {
            alpha_threshold: config.alpha_threshold,
            ..Self::default()
        };
        tester.with_region(
            BodyPart::Mouth,
            RectMask {
                rect: config.mouth_rect,
                origin: body_origin,
            },
        )
    }

    /// Alpha a sprite pixel must exceed to count as a hit.
    #[must_use]
    pub fn alpha_threshold(&self) -> u8 {
        self.alpha_threshold
    }

    /// Register a sprite drawn into `frame`, hit-tested at this tester's
    /// alpha threshold.
    #[must_use]
    pub fn with_sprite(mut self, part: BodyPart, frame: Rect, bitmap: AlphaBitmap) -> Self {
        self.set_sprite(part, frame, bitmap);
        self
    }

    /// Replace the sprite for `part`, e.g. after the hair texture changed.
    pub fn set_sprite(&mut self, part: BodyPart, frame: Rect, bitmap: AlphaBitmap) {
        let mask = SpriteMask::new(frame, bitmap, self.alpha_threshold);
        self.set_region(part, mask);
    }

    /// Register (or replace) the mask for `part`.
    #[must_use]
    pub fn with_region(mut self, part: BodyPart, mask: impl HitMask + 'static) -> Self {
        self.set_region(part, mask);
        self
    }

    /// Register (or replace) the mask for `part`, e.g. after the hair
    /// texture changed.
    pub fn set_region(&mut self, part: BodyPart, mask: impl HitMask + 'static) {
        self.regions.retain(|(p, _)| *p != part);
        self.regions.push((part, Box::new(mask)));
        self.regions.sort_by_key(|(p, _)| p.priority());
    }

    /// Parts that currently have a mask, in check order.
    #[must_use]
    pub fn parts(&self) -> Vec<BodyPart> {
        self.regions.iter().map(|(p, _)| *p).collect()
    }

    /// First part whose mask contains `point`.
    #[must_use]
    pub fn resolve(&self, point: Point) -> Option<BodyPart> {
        let hit = self
            .regions
            .iter()
            .find(|(_, mask)| mask.contains(point))
            .map(|(part, _)| *part);
        trace!(%point, part = ?hit, "hit test");
        hit
    }
}

impl PartLocator for BodyPartHitTester {
    fn locate(&self, point: Point) -> Option<BodyPart> {
        self.resolve(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    /// 4×2 bitmap: top row opaque on the left half, bottom row faint.
    fn sample_bitmap() -> AlphaBitmap {
        AlphaBitmap::from_alpha(4, 2, vec![255, 255, 0, 0, 20, 21, 20, 21]).expect("valid")
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = AlphaBitmap::from_rgba8(2, 2, &[0; 15]).unwrap_err();
        assert!(matches!(
            err,
            PanduError::InvalidMask {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn bitmap_samples_with_bottom_left_origin() {
        let bitmap = sample_bitmap();
        // Top-left quadrant is the first stored row.
        assert!(bitmap.is_opaque_at(0.1, 0.9, 20));
        assert!(!bitmap.is_opaque_at(0.9, 0.9, 20));
        // Bottom row: alpha must strictly exceed the threshold.
        assert!(!bitmap.is_opaque_at(0.1, 0.1, 20));
        assert!(bitmap.is_opaque_at(0.3, 0.1, 20));
        assert!(!bitmap.is_opaque_at(1.0, 0.5, 20));
    }

    #[test]
    fn bitmap_without_alpha_is_opaque() {
        let bitmap = AlphaBitmap::from_rgb8(2, 2, &[0; 12]).expect("valid");
        assert!(bitmap.is_opaque_at(0.5, 0.5, 200));
    }

    #[test]
    fn sprite_mask_checks_frame_first() {
        let frame = Rect::centered(Point::new(100.0, 100.0), Size::new(40.0, 20.0));
        let mask = SpriteMask::new(frame, sample_bitmap(), 20);
        // Upper-left area of the sprite.
        assert!(mask.contains(Point::new(85.0, 108.0)));
        // Upper-right area is transparent.
        assert!(!mask.contains(Point::new(115.0, 108.0)));
        // Outside the frame entirely.
        assert!(!mask.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn priority_order_wins_over_insertion_order() {
        let everywhere = Rect::centered(Point::ZERO, Size::new(1000.0, 1000.0));
        let tester = BodyPartHitTester::new()
            .with_region(BodyPart::Hair, RectMask::scene(everywhere))
            .with_region(BodyPart::Nose, RectMask::scene(everywhere));
        assert_eq!(tester.parts(), vec![BodyPart::Nose, BodyPart::Hair]);
        assert_eq!(tester.resolve(Point::new(5.0, 5.0)), Some(BodyPart::Nose));
    }

    #[test]
    fn mouth_rect_is_body_relative() {
        let tester = BodyPartHitTester::from_config(&HitTestConfig::default(), Point::new(0.0, -100.0));
        // Mouth center (40, 75) in body space sits at (40, -25) in the scene.
        assert_eq!(tester.resolve(Point::new(40.0, -25.0)), Some(BodyPart::Mouth));
        assert_eq!(tester.resolve(Point::new(40.0, 200.0)), None);
    }

    #[test]
    fn sprites_use_the_configured_threshold() {
        let frame = Rect::centered(Point::new(0.0, 300.0), Size::new(40.0, 20.0));
        // Bottom-left pixel has alpha 20.
        let faint = Point::new(-15.0, 295.0);

        let strict = BodyPartHitTester::from_config(&HitTestConfig::default(), Point::ZERO)
            .with_sprite(BodyPart::Hair, frame, sample_bitmap());
        assert_eq!(strict.alpha_threshold(), 20);
        assert_eq!(strict.resolve(faint), None);

        let lenient = HitTestConfig {
            alpha_threshold: 10,
            ..HitTestConfig::default()
        };
        let tester = BodyPartHitTester::from_config(&lenient, Point::ZERO)
            .with_sprite(BodyPart::Hair, frame, sample_bitmap());
        assert_eq!(tester.resolve(faint), Some(BodyPart::Hair));
    }
}
