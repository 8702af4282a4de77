//! Crop rectangle solving: initial placement, constraint pipeline, and
//! handle-driven resize.
//!
//! All rectangles here live in image space (source-pixel units, origin at the
//! image's top-left). Conversion to and from preview space is handled by
//! [`crate::space`]. Pure geometry — no pixel operations, no allocations,
//! `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use cropkit::{AspectRatio, CropSolver, Dimensions};
//!
//! let solver = CropSolver::new(
//!     Dimensions::new(4000, 3000),
//!     Some(AspectRatio::new(1.0, 1.0)),
//! )
//! .unwrap();
//!
//! // Largest centered square inside a 4:3 image.
//! let rect = solver.initial_placement();
//! assert_eq!((rect.x, rect.y), (500.0, 0.0));
//! assert_eq!((rect.width, rect.height), (3000.0, 3000.0));
//! ```

#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::Float;

use crate::ratio::AspectRatio;

/// Default minimum crop extent in source pixels.
pub const DEFAULT_MIN_SIZE: f64 = 50.0;

/// How far a rectangle's aspect may drift from the target before the
/// constraint pipeline re-derives it.
const ASPECT_TOLERANCE: f64 = 0.01;

/// Native pixel size of a loaded image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width-to-height ratio.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Axis-aligned rectangle in one coordinate space.
///
/// A `Rect` is either in image space or preview space; the two must never be
/// mixed without going through [`crate::space::to_preview`] /
/// [`crate::space::to_image`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width-to-height ratio.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Whether the rect lies fully inside `(0, 0, image.width, image.height)`.
    pub fn within(&self, image: Dimensions) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= image.width as f64
            && self.bottom() <= image.height as f64
    }
}

/// Geometry computation error.
///
/// Every variant is an integration error — a precondition the calling layer
/// must uphold. Ordinary runtime conditions (a rectangle touching an edge,
/// an oversized typed-in dimension) are handled by clamping and never error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Aspect ratio has a non-positive component.
    InvalidRatio,
    /// Image has a zero width or height.
    InvalidImage,
    /// Ratio reduction of a 0×0 size.
    DegenerateSize,
    /// Non-positive or non-finite scale factor in a space conversion.
    InvalidScale,
}

/// One of the four corner grips used to resize the crop rectangle.
///
/// The opposite corner stays fixed for the duration of the resize: `Se`
/// pins the top-left, `Sw` the top-right, `Ne` the bottom-left, `Nw` the
/// bottom-right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Top-left grip.
    Nw,
    /// Top-right grip.
    Ne,
    /// Bottom-left grip.
    Sw,
    /// Bottom-right grip.
    Se,
}

impl Handle {
    /// Pointer delta mapped to width change. Moving away from the fixed
    /// corner grows the rectangle.
    fn signed_dx(&self, dx: f64) -> f64 {
        match self {
            Self::Nw | Self::Sw => -dx,
            Self::Ne | Self::Se => dx,
        }
    }

    /// Pointer delta mapped to height change (free-ratio resize only).
    fn signed_dy(&self, dy: f64) -> f64 {
        match self {
            Self::Nw | Self::Ne => -dy,
            Self::Sw | Self::Se => dy,
        }
    }

    /// Whether the left edge (`x`) stays fixed during this resize.
    fn fixes_left(&self) -> bool {
        matches!(self, Self::Ne | Self::Se)
    }

    /// Whether the top edge (`y`) stays fixed during this resize.
    fn fixes_top(&self) -> bool {
        matches!(self, Self::Sw | Self::Se)
    }
}

/// Which dimension a direct pixel-value edit targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Width,
    Height,
}

/// Crop rectangle solver for one image and one (optional) target ratio.
///
/// Holds only the inputs; every operation is a pure function of its
/// arguments. `ratio: None` means a free rectangle with no ratio constraint.
///
/// # Example
///
/// ```
/// use cropkit::{AspectRatio, CropSolver, Dimensions, Handle, Rect};
///
/// let solver = CropSolver::new(
///     Dimensions::new(1200, 1000),
///     Some(AspectRatio::new(16.0, 9.0)),
/// )
/// .unwrap();
///
/// let anchor = Rect::new(0.0, 0.0, 1000.0, 562.5);
/// let resized = solver.handle_resize(Handle::Se, anchor, 100.0, 0.0);
/// assert_eq!((resized.x, resized.y), (0.0, 0.0));
/// assert_eq!(resized.width, 1100.0);
/// assert!((resized.height - 618.75).abs() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CropSolver {
    image: Dimensions,
    ratio: Option<AspectRatio>,
    min_size: f64,
}

impl CropSolver {
    /// Create a solver for the given image and target ratio.
    ///
    /// Fails with [`GeometryError::InvalidImage`] on a zero image dimension
    /// and [`GeometryError::InvalidRatio`] on a non-positive ratio component.
    pub fn new(image: Dimensions, ratio: Option<AspectRatio>) -> Result<Self, GeometryError> {
        if image.width == 0 || image.height == 0 {
            return Err(GeometryError::InvalidImage);
        }
        if let Some(r) = &ratio
            && (r.width <= 0.0 || r.height <= 0.0)
        {
            return Err(GeometryError::InvalidRatio);
        }
        Ok(Self {
            image,
            ratio,
            min_size: DEFAULT_MIN_SIZE,
        })
    }

    /// Override the minimum crop extent (source pixels).
    pub fn min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    /// The image this solver operates on.
    pub fn image(&self) -> Dimensions {
        self.image
    }

    /// The active target ratio, if any.
    pub fn ratio(&self) -> Option<&AspectRatio> {
        self.ratio.as_ref()
    }

    fn target_aspect(&self) -> Option<f64> {
        self.ratio.as_ref().map(AspectRatio::aspect)
    }

    /// Largest ratio-exact rectangle centered in the image.
    ///
    /// One output dimension equals the corresponding image dimension, so the
    /// result is in bounds by construction. With no active ratio the full
    /// image is returned.
    pub fn initial_placement(&self) -> Rect {
        let iw = self.image.width as f64;
        let ih = self.image.height as f64;
        let target = self.target_aspect().unwrap_or(iw / ih);

        let (width, height) = if iw / ih > target {
            // Image wider than target: full height, derive width.
            (ih * target, ih)
        } else {
            // Image taller (or equal): full width, derive height.
            (iw, iw / target)
        };

        Rect {
            x: ((iw - width) / 2.0).max(0.0),
            y: ((ih - height) / 2.0).max(0.0),
            width,
            height,
        }
    }

    /// Pull a drifted rectangle back to a ratio-exact, in-bounds,
    /// minimum-size result.
    ///
    /// Five corrective steps, each of which only shrinks or repositions the
    /// previous step's output — termination needs no iteration:
    ///
    /// 1. re-derive the off-ratio dimension (preferring to shrink),
    /// 2. floor the controlling dimension at the minimum size,
    /// 3. scale uniformly to fit the right/bottom edges,
    /// 4. reset a negative origin to 0 and re-derive size from the available
    ///    span, re-checking the opposite edge,
    /// 5. one final uniform scale-down, then round to integer pixels (the
    ///    height follows the rounded width when a ratio is active) and clamp
    ///    the origin to ≥ 0.
    pub fn constrain(&self, rect: Rect) -> Rect {
        let target = self.target_aspect();
        let r = match target {
            Some(t) => force_ratio(rect, t),
            None => rect,
        };
        let r = enforce_min_size(r, target, self.min_size);
        let r = shrink_to_right_bottom(r, self.image, target.is_some());
        let r = clamp_left_top(r, self.image, target);
        let r = shrink_to_right_bottom(r, self.image, target.is_some());
        round_output(r, self.image, target)
    }

    /// Resize from a corner grip, pinning the opposite corner.
    ///
    /// `width' = anchor.width + signed dx`, floored at the minimum size;
    /// height follows the ratio exactly (or the signed dy when free). The
    /// fixed corner's coordinates are reproduced exactly from the anchor.
    /// The result is passed through [`constrain`](Self::constrain) only when
    /// it leaves the image bounds; inside bounds it is returned untouched.
    pub fn handle_resize(&self, handle: Handle, anchor: Rect, dx: f64, dy: f64) -> Rect {
        let width = (anchor.width + handle.signed_dx(dx)).max(self.min_size);
        let height = match self.target_aspect() {
            Some(t) => width / t,
            None => (anchor.height + handle.signed_dy(dy)).max(self.min_size),
        };

        let x = if handle.fixes_left() {
            anchor.x
        } else {
            anchor.right() - width
        };
        let y = if handle.fixes_top() {
            anchor.y
        } else {
            anchor.bottom() - height
        };

        let out = Rect {
            x,
            y,
            width,
            height,
        };
        if out.within(self.image) {
            out
        } else {
            self.constrain(out)
        }
    }

    /// Translate the anchor rectangle by a pointer delta, clamped so the
    /// rectangle stays fully inside the image. Size is unchanged.
    pub fn drag_translate(&self, anchor: Rect, dx: f64, dy: f64) -> Rect {
        let max_x = (self.image.width as f64 - anchor.width).max(0.0);
        let max_y = (self.image.height as f64 - anchor.height).max(0.0);
        Rect {
            x: (anchor.x + dx).clamp(0.0, max_x),
            y: (anchor.y + dy).clamp(0.0, max_y),
            ..anchor
        }
    }

    /// Apply a directly typed pixel value for one dimension.
    ///
    /// The other dimension follows the active ratio (or stays unchanged when
    /// free). A value below the minimum size is floored the same way a
    /// resize is; an oversized one is scaled down proportionally to the span
    /// remaining from the rectangle's current top-left. The result is then
    /// re-centered on the previous center, clamped in-bounds. A zero value
    /// is rejected: the current rectangle is returned unchanged.
    pub fn dimension_edit(&self, field: Field, value: u32, current: Rect) -> Rect {
        if value == 0 {
            return current;
        }
        let v = value as f64;
        let target = self.target_aspect();
        let (width, height) = match (field, target) {
            (Field::Width, Some(t)) => (v, v / t),
            (Field::Height, Some(t)) => (v * t, v),
            (Field::Width, None) => (v, current.height),
            (Field::Height, None) => (current.width, v),
        };
        let floored = enforce_min_size(
            Rect {
                width,
                height,
                ..current
            },
            target,
            self.min_size,
        );
        let (mut width, mut height) = (floored.width, floored.height);

        let iw = self.image.width as f64;
        let ih = self.image.height as f64;
        let avail_w = iw - current.x;
        let avail_h = ih - current.y;
        let s = (avail_w / width).min(avail_h / height).min(1.0);
        if s < 1.0 {
            width *= s;
            height *= s;
        }

        let (cx, cy) = current.center();
        Rect {
            x: (cx - width / 2.0).clamp(0.0, iw - width),
            y: (cy - height / 2.0).clamp(0.0, ih - height),
            width,
            height,
        }
    }
}

// ============================================================================
// Constraint pipeline steps
// ============================================================================

/// Step 1: re-derive the off-ratio dimension, preferring to shrink.
///
/// Two pass-through gates: an absolute aspect band, and a sub-pixel check
/// for small rectangles, where a single pixel of rounding shifts the aspect
/// past the band. A height within one pixel of the ratio-derived height is
/// already on ratio.
fn force_ratio(r: Rect, target: f64) -> Rect {
    if (r.aspect() - target).abs() <= ASPECT_TOLERANCE {
        return r;
    }
    if (r.height - r.width / target).abs() < 1.0 {
        return r;
    }
    if r.width / target <= r.height {
        Rect {
            height: r.width / target,
            ..r
        }
    } else {
        Rect {
            width: r.height * target,
            ..r
        }
    }
}

/// Step 2: floor the controlling dimension at `min`, re-deriving the other
/// from the ratio so both end up ≥ `min`.
fn enforce_min_size(r: Rect, target: Option<f64>, min: f64) -> Rect {
    match target {
        Some(t) => {
            // Smallest ratio-exact width with both sides at least `min`.
            let floor = min.max(min * t);
            if r.width >= floor {
                r
            } else {
                Rect {
                    width: floor,
                    height: floor / t,
                    ..r
                }
            }
        }
        None => Rect {
            width: r.width.max(min),
            height: r.height.max(min),
            ..r
        },
    }
}

/// Steps 3 and 5: fit the right and bottom edges. With an active ratio the
/// scale-down is uniform, by the smaller of the two required shrink factors
/// (scaling the axes independently would break the ratio). A free rectangle
/// clamps each axis on its own.
fn shrink_to_right_bottom(r: Rect, image: Dimensions, uniform: bool) -> Rect {
    let iw = image.width as f64;
    let ih = image.height as f64;
    if !uniform {
        return Rect {
            width: r.width.min(iw - r.x),
            height: r.height.min(ih - r.y),
            ..r
        };
    }
    let sx = if r.right() > iw {
        (iw - r.x) / r.width
    } else {
        1.0
    };
    let sy = if r.bottom() > ih {
        (ih - r.y) / r.height
    } else {
        1.0
    };
    let s = sx.min(sy);
    if s >= 1.0 {
        return r;
    }
    let s = s.max(0.0);
    Rect {
        width: r.width * s,
        height: r.height * s,
        ..r
    }
}

/// Step 4: reset a negative origin to 0 and re-derive size from the span
/// available on that axis. The ratio-driven re-derivation can overflow the
/// opposite edge, so that edge is re-checked and shrunk uniformly if needed.
fn clamp_left_top(r: Rect, image: Dimensions, target: Option<f64>) -> Rect {
    let iw = image.width as f64;
    let ih = image.height as f64;
    let mut r = r;

    if r.x < 0.0 {
        r.x = 0.0;
        r.width = r.width.min(iw);
        if let Some(t) = target {
            r.height = r.width / t;
            if r.bottom() > ih {
                let s = ((ih - r.y).max(0.0)) / r.height;
                r.width *= s;
                r.height *= s;
            }
        }
    }
    if r.y < 0.0 {
        r.y = 0.0;
        r.height = r.height.min(ih);
        if let Some(t) = target {
            r.width = r.height * t;
            if r.right() > iw {
                let s = ((iw - r.x).max(0.0)) / r.width;
                r.width *= s;
                r.height *= s;
            }
        }
    }
    r
}

/// Final output pass: round to integer pixels without letting the rounding
/// push the rect past an image edge, and clamp the origin to ≥ 0 last.
///
/// With an active ratio the height is derived from the rounded width rather
/// than rounded on its own. Independent rounding can tilt a small rect's
/// aspect past the step-1 gates, and the next pass would shrink it again;
/// the derived pair is a fixed point of the whole pipeline.
fn round_output(r: Rect, image: Dimensions, target: Option<f64>) -> Rect {
    let iw = image.width as f64;
    let ih = image.height as f64;
    let mut width = r.width.round();
    if r.x + width > iw {
        width = r.width.floor();
    }
    let exact_height = match target {
        Some(t) => width / t,
        None => r.height,
    };
    let mut height = exact_height.round();
    if r.y + height > ih {
        height = exact_height.floor();
    }
    Rect {
        x: r.x.max(0.0),
        y: r.y.max(0.0),
        width,
        height,
    }
}
