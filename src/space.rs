//! Conversion between image space and preview space.
//!
//! The preview is always a uniformly scaled, aspect-preserving rendering of
//! the image, so one scale factor (`preview_width / image_width`) relates the
//! two spaces on both axes. The factor is derived from an (image, viewport)
//! pair and never stored independently of it.

use crate::solver::{Dimensions, GeometryError, Rect};

/// A preview box fitted inside a viewport, plus the scale that produced it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PreviewFit {
    /// Preview width in screen pixels.
    pub width: f64,
    /// Preview height in screen pixels.
    pub height: f64,
    /// `width / image.width`; applies to both axes.
    pub scale: f64,
}

/// Project an image-space rect into preview space.
///
/// Fails with [`GeometryError::InvalidScale`] unless `scale` is finite
/// and positive.
pub fn to_preview(rect: Rect, scale: f64) -> Result<Rect, GeometryError> {
    check_scale(scale)?;
    Ok(Rect {
        x: rect.x * scale,
        y: rect.y * scale,
        width: rect.width * scale,
        height: rect.height * scale,
    })
}

/// Project a preview-space rect back into image space.
///
/// Fails with [`GeometryError::InvalidScale`] unless `scale` is finite
/// and positive.
pub fn to_image(rect: Rect, scale: f64) -> Result<Rect, GeometryError> {
    check_scale(scale)?;
    Ok(Rect {
        x: rect.x / scale,
        y: rect.y / scale,
        width: rect.width / scale,
        height: rect.height / scale,
    })
}

/// Fit an image inside a viewport, preserving its aspect ratio.
///
/// The wider of the two (image vs. viewport) decides which axis is clamped:
/// a relatively wider image takes the full viewport width and derives its
/// height, otherwise the full height and derives its width.
pub fn fit_dimensions(
    image: Dimensions,
    max_width: f64,
    max_height: f64,
) -> Result<PreviewFit, GeometryError> {
    if image.width == 0 || image.height == 0 {
        return Err(GeometryError::InvalidImage);
    }
    check_scale(max_width)?;
    check_scale(max_height)?;

    let image_aspect = image.aspect();
    let container_aspect = max_width / max_height;

    let (width, height) = if image_aspect > container_aspect {
        (max_width, max_width / image_aspect)
    } else {
        (max_height * image_aspect, max_height)
    };

    Ok(PreviewFit {
        width,
        height,
        scale: width / image.width as f64,
    })
}

fn check_scale(scale: f64) -> Result<(), GeometryError> {
    if scale > 0.0 && scale.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidScale)
    }
}
