//! Raster export: crop a finished image-space rectangle out of the source
//! pixels and pick an output format and file name.
//!
//! This is the one non-geometry module in the crate, gated behind the
//! `raster` feature. It accepts a rectangle the solver has already
//! constrained; the only geometry left here is integer snapping and a final
//! clamp to the source bounds.
//!
//! # Example
//!
//! ```
//! use cropkit::export::export_file_name;
//! use cropkit::{AspectRatio, Rect};
//!
//! let ratio = AspectRatio::named(16.0, 9.0, "Widescreen");
//! let name = export_file_name(Some("vacation.jpg"), Some(&ratio), None);
//! assert_eq!(name, "vacation_16x9.webp");
//! ```

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

use crate::ratio::{AspectRatio, reduce};
use crate::solver::{GeometryError, Rect};

/// Output encoding for the cropped image.
///
/// Sources that are already PNG or WebP keep their format; everything else
/// is converted to WebP.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    WebP,
    Jpeg,
}

impl ExportFormat {
    /// Choose the output format from the source file name.
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.').map(|(_, ext)| ext) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Png,
            Some(ext) if ext.eq_ignore_ascii_case("webp") => Self::WebP,
            _ => Self::WebP,
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Jpeg => "jpg",
        }
    }

    fn to_image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::WebP => ImageFormat::WebP,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Crop the source pixels to an image-space rectangle at full resolution.
///
/// The rectangle is snapped to integer pixels and clamped to the source;
/// a zero-size source fails with [`GeometryError::InvalidImage`].
pub fn crop_pixels(source: &DynamicImage, rect: Rect) -> Result<DynamicImage, GeometryError> {
    let (sw, sh) = source.dimensions();
    if sw == 0 || sh == 0 {
        return Err(GeometryError::InvalidImage);
    }
    let x = (rect.x.round().max(0.0) as u32).min(sw - 1);
    let y = (rect.y.round().max(0.0) as u32).min(sh - 1);
    let width = (rect.width.round().max(1.0) as u32).min(sw - x);
    let height = (rect.height.round().max(1.0) as u32).min(sh - y);
    Ok(source.crop_imm(x, y, width, height))
}

/// Encode an image in the given format.
pub fn encode(image: &DynamicImage, format: ExportFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format.to_image_format())?;
    Ok(buf)
}

/// Build the output file name: original base name plus a `_WxH` ratio
/// suffix and the chosen format's extension.
///
/// The suffix comes from the selected ratio when one is active, otherwise
/// from the crop rectangle's reduced ratio. Without an original name the
/// base is `cropped-image`.
pub fn export_file_name(
    original: Option<&str>,
    ratio: Option<&AspectRatio>,
    rect: Option<&Rect>,
) -> String {
    let base = match original {
        Some(name) if !name.is_empty() => name.rsplit_once('.').map_or(name, |(stem, _)| stem),
        _ => "cropped-image",
    };

    let suffix = match (ratio, rect) {
        (Some(r), _) => format!("_{}x{}", r.width as u32, r.height as u32),
        (None, Some(r)) => {
            match reduce(r.width.round() as u32, r.height.round() as u32) {
                Ok((w, h)) => format!("_{w}x{h}"),
                Err(_) => String::new(),
            }
        }
        (None, None) => String::new(),
    };

    let format = match original {
        Some(name) => ExportFormat::from_file_name(name),
        None => ExportFormat::WebP,
    };

    format!("{base}{suffix}.{}", format.extension())
}
