//! Gesture session: drag/resize-in-progress state between the input source
//! and the solver.
//!
//! The session owns nothing but the anchor snapshot taken at gesture start.
//! Every pointer move recomputes the rectangle from that immutable anchor —
//! never from the previous move's output — so a long drag accumulates no
//! rounding drift. All pointer positions and deltas are in image-space
//! units; the caller converts from screen coordinates first (see
//! [`crate::space`]).

use crate::solver::{CropSolver, Handle, Rect};

/// Snapshot taken at gesture start and held for the gesture's lifetime.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragAnchor {
    /// Pointer position when the gesture started.
    pub pointer_start: (f64, f64),
    /// Crop rectangle when the gesture started.
    pub rect: Rect,
}

/// What the session is currently tracking.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum SessionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Whole-rectangle translation.
    Dragging(DragAnchor),
    /// Corner-handle resize.
    Resizing(Handle, DragAnchor),
}

/// A gesture-boundary or pointer-move event from the input source.
///
/// This is the full input contract of the core: whatever delivers pointer
/// events (mouse, touch, test harness) only has to produce this stream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// Gesture start. `handle: None` begins a drag, `Some` a resize.
    Start {
        handle: Option<Handle>,
        pointer: (f64, f64),
        rect: Rect,
    },
    /// Pointer moved to a new position.
    Move { pointer: (f64, f64) },
    /// Gesture finished (pointer up, touch end, or cancel).
    End,
}

/// Tracks one gesture at a time and feeds deltas to a [`CropSolver`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// A session with no gesture in progress.
    pub const fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, SessionState::Idle)
    }

    /// Start a whole-rectangle drag. Replaces any gesture in progress.
    pub fn begin_drag(&mut self, rect: Rect, pointer: (f64, f64)) {
        self.state = SessionState::Dragging(DragAnchor {
            pointer_start: pointer,
            rect,
        });
    }

    /// Start a corner-handle resize. Replaces any gesture in progress.
    pub fn begin_resize(&mut self, handle: Handle, rect: Rect, pointer: (f64, f64)) {
        self.state = SessionState::Resizing(
            handle,
            DragAnchor {
                pointer_start: pointer,
                rect,
            },
        );
    }

    /// Translate a pointer position into a delta against the anchor and ask
    /// the solver for the resulting rectangle. Returns `None` while idle.
    pub fn pointer_move(&self, pointer: (f64, f64), solver: &CropSolver) -> Option<Rect> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Dragging(a) => {
                let (dx, dy) = delta(pointer, a);
                Some(solver.drag_translate(a.rect, dx, dy))
            }
            SessionState::Resizing(h, a) => {
                let (dx, dy) = delta(pointer, a);
                Some(solver.handle_resize(*h, a.rect, dx, dy))
            }
        }
    }

    /// End the gesture. No state survives into the next one.
    pub fn end(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Drive the session from an event stream.
    ///
    /// Returns the updated rectangle for `Move` events during an active
    /// gesture; `Start`, `End`, and moves while idle return `None`.
    pub fn apply(&mut self, event: &GestureEvent, solver: &CropSolver) -> Option<Rect> {
        match event {
            GestureEvent::Start {
                handle: None,
                pointer,
                rect,
            } => {
                self.begin_drag(*rect, *pointer);
                None
            }
            GestureEvent::Start {
                handle: Some(h),
                pointer,
                rect,
            } => {
                self.begin_resize(*h, *rect, *pointer);
                None
            }
            GestureEvent::Move { pointer } => self.pointer_move(*pointer, solver),
            GestureEvent::End => {
                self.end();
                None
            }
        }
    }
}

fn delta(pointer: (f64, f64), anchor: &DragAnchor) -> (f64, f64) {
    (
        pointer.0 - anchor.pointer_start.0,
        pointer.1 - anchor.pointer_start.1,
    )
}
