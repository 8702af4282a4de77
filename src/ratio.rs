//! Aspect ratios: the named catalog, reduction, and display formatting.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::format;
#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::string::String;

use crate::solver::{Dimensions, GeometryError};

/// A target width-to-height ratio.
///
/// Represents what the crop rectangle should be, not what it currently is.
/// Catalog entries carry a display name; a ratio reduced from an image's own
/// dimensions does not.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
    /// Display name ("Square", "Widescreen", …). `None` for a ratio derived
    /// from measured dimensions.
    pub name: Option<&'static str>,
}

impl AspectRatio {
    /// An unnamed ratio.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            name: None,
        }
    }

    /// A named catalog ratio.
    pub const fn named(width: f64, height: f64, name: &'static str) -> Self {
        Self {
            width,
            height,
            name: Some(name),
        }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// The reduced native ratio of an image (e.g. 1920×1080 → 16:9).
    pub fn of(image: Dimensions) -> Result<Self, GeometryError> {
        if image.width == 0 || image.height == 0 {
            return Err(GeometryError::InvalidImage);
        }
        let (w, h) = reduce(image.width, image.height)?;
        Ok(Self::new(w as f64, h as f64))
    }
}

/// The predefined ratio catalog.
pub const CATALOG: [AspectRatio; 17] = [
    AspectRatio::named(1.0, 1.0, "Square"),
    AspectRatio::named(4.0, 3.0, "Standard"),
    AspectRatio::named(3.0, 4.0, "Portrait"),
    AspectRatio::named(16.0, 9.0, "Widescreen"),
    AspectRatio::named(9.0, 16.0, "Vertical Video"),
    AspectRatio::named(4.0, 5.0, "Instagram Post"),
    AspectRatio::named(5.0, 4.0, "Medium Format"),
    AspectRatio::named(3.0, 2.0, "Photo"),
    AspectRatio::named(2.0, 3.0, "Portrait Photo"),
    AspectRatio::named(16.0, 10.0, "16:10 Monitor"),
    AspectRatio::named(21.0, 9.0, "Ultrawide"),
    AspectRatio::named(32.0, 9.0, "Super Ultrawide"),
    AspectRatio::named(8.0, 10.0, "Print 8x10"),
    AspectRatio::named(11.0, 14.0, "Print 11x14"),
    AspectRatio::named(8.0, 11.0, "Letter"),
    AspectRatio::named(297.0, 210.0, "A4 Landscape"),
    AspectRatio::named(210.0, 297.0, "A4 Portrait"),
];

/// Reduce a pixel size to its simplest integer ratio.
///
/// `gcd(0, x) = x`, so a single zero axis reduces cleanly (`0×5` → `0:1`);
/// only `0×0` is rejected with [`GeometryError::DegenerateSize`].
pub fn reduce(width: u32, height: u32) -> Result<(u32, u32), GeometryError> {
    if width == 0 && height == 0 {
        return Err(GeometryError::DegenerateSize);
    }
    let d = gcd(width, height);
    Ok((width / d, height / d))
}

/// Render a pixel size as its reduced "W:H" form.
#[cfg(feature = "alloc")]
pub fn format_ratio(width: u32, height: u32) -> Result<String, GeometryError> {
    let (w, h) = reduce(width, height)?;
    Ok(format!("{w}:{h}"))
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── reduce ──────────────────────────────────────────────────────────

    #[test]
    fn reduce_full_hd() {
        assert_eq!(reduce(1920, 1080), Ok((16, 9)));
    }

    #[test]
    fn reduce_coprime_is_identity() {
        assert_eq!(reduce(210, 297), Ok((70, 99)));
        assert_eq!(reduce(7, 5), Ok((7, 5)));
    }

    #[test]
    fn reduce_single_zero_axis() {
        assert_eq!(reduce(0, 5), Ok((0, 1)));
        assert_eq!(reduce(5, 0), Ok((1, 0)));
    }

    #[test]
    fn reduce_both_zero_is_degenerate() {
        assert_eq!(reduce(0, 0), Err(GeometryError::DegenerateSize));
    }

    // ── formatting ──────────────────────────────────────────────────────

    #[cfg(feature = "alloc")]
    #[test]
    fn format_reduces_first() {
        assert_eq!(format_ratio(1920, 1080).unwrap(), "16:9");
        assert_eq!(format_ratio(4000, 3000).unwrap(), "4:3");
        assert_eq!(format_ratio(1000, 1000).unwrap(), "1:1");
    }

    // ── catalog ─────────────────────────────────────────────────────────

    #[test]
    fn catalog_entries_are_named_and_positive() {
        for entry in &CATALOG {
            assert!(entry.name.is_some());
            assert!(entry.width > 0.0 && entry.height > 0.0);
        }
    }

    #[test]
    fn catalog_has_square_and_a4() {
        assert!(CATALOG.iter().any(|r| r.name == Some("Square")
            && r.aspect() == 1.0));
        assert!(CATALOG.iter().any(|r| r.name == Some("A4 Portrait")
            && r.width == 210.0
            && r.height == 297.0));
    }

    // ── native ratio ────────────────────────────────────────────────────

    #[test]
    fn native_ratio_is_reduced() {
        let r = AspectRatio::of(Dimensions::new(1920, 1080)).unwrap();
        assert_eq!((r.width, r.height), (16.0, 9.0));
        assert_eq!(r.name, None);
    }

    #[test]
    fn native_ratio_of_zero_image_rejected() {
        assert_eq!(
            AspectRatio::of(Dimensions::new(0, 1080)),
            Err(GeometryError::InvalidImage)
        );
    }
}
