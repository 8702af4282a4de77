//! Crop-rectangle geometry with aspect-ratio constraint solving, preview
//! mapping, and gesture sessions.
//!
//! Pure geometry — no pixel operations, no allocations in the core,
//! `no_std` compatible. The optional `raster` feature adds pixel cropping
//! and encoding on top via the `image` crate.
//!
//! # Modules
//!
//! - [`solver`] — core types, the constraint pipeline, handle resize, and
//!   dimension edits
//! - [`space`] — image-space ⇄ preview-space conversion and viewport fitting
//! - [`ratio`] — the named ratio catalog, gcd reduction, and formatting
//! - [`session`] — the `Idle | Dragging | Resizing` gesture state machine
//! - [`export`] — raster crop and output naming (`raster` feature)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "raster")]
pub mod export;
pub mod ratio;
pub mod session;
pub mod solver;
pub mod space;

// Re-exports: core types from the solver module
pub use ratio::{AspectRatio, CATALOG, reduce};
#[cfg(feature = "alloc")]
pub use ratio::format_ratio;
pub use session::{DragAnchor, GestureEvent, Session, SessionState};
pub use solver::{
    CropSolver, DEFAULT_MIN_SIZE, Dimensions, Field, GeometryError, Handle, Rect,
};
pub use space::{PreviewFit, fit_dimensions, to_image, to_preview};
