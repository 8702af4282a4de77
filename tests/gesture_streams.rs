//! Full gesture streams against the session + solver, checked invariant by
//! invariant.
//!
//! Plays the event sequences a UI layer would produce — load image, pick a
//! ratio, fit the preview, drag and resize with the pointer, type a
//! dimension — and asserts after every single move that the rectangle is
//! in bounds, on ratio, and reproducible from the anchor.

use cropkit::*;

/// Aspect drift allowed on a constrained (integer-rounded) rectangle.
const ASPECT_BAND: f64 = 0.01;
const EPS: f64 = 1e-9;

fn assert_in_bounds(r: Rect, image: Dimensions) {
    assert!(r.x >= -EPS && r.y >= -EPS, "{r:?} has negative origin");
    assert!(
        r.right() <= image.width as f64 + EPS && r.bottom() <= image.height as f64 + EPS,
        "{r:?} exceeds {image:?}"
    );
}

fn assert_on_ratio(r: Rect, ratio: &AspectRatio) {
    let drift = (r.aspect() - ratio.aspect()).abs();
    assert!(drift <= ASPECT_BAND, "{r:?} off ratio by {drift}");
}

// ---- Viewport fitting and space round-trips ----

#[test]
fn preview_projection_round_trips_through_the_fitted_scale() {
    let image = Dimensions::new(4000, 3000);
    let fit = fit_dimensions(image, 800.0, 800.0).unwrap();
    assert_eq!(fit.scale, 0.2);

    let solver = CropSolver::new(image, Some(AspectRatio::new(1.0, 1.0))).unwrap();
    let rect = solver.initial_placement();
    assert_eq!(rect, Rect::new(500.0, 0.0, 3000.0, 3000.0));

    let preview = to_preview(rect, fit.scale).unwrap();
    assert!(preview.right() <= fit.width + EPS);
    assert!(preview.bottom() <= fit.height + EPS);

    let back = to_image(preview, fit.scale).unwrap();
    assert!((back.x - rect.x).abs() < EPS);
    assert!((back.width - rect.width).abs() < EPS);
}

// ---- Resize gestures ----

#[test]
fn corner_resize_stream_holds_invariants_at_every_move() {
    let image = Dimensions::new(4000, 3000);
    let ratio = AspectRatio::named(16.0, 9.0, "Widescreen");
    let solver = CropSolver::new(image, Some(ratio)).unwrap();
    let start = solver.initial_placement();

    for handle in [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se] {
        let mut session = Session::new();
        session.apply(
            &GestureEvent::Start {
                handle: Some(handle),
                pointer: (2000.0, 1500.0),
                rect: start,
            },
            &solver,
        );

        // A jittery sweep out, past the image edge, and back.
        let mut last = start;
        for step in 1..=60 {
            let dx = (step as f64) * 37.0 - 800.0;
            let dy = (step as f64) * -11.5;
            let r = session
                .apply(
                    &GestureEvent::Move {
                        pointer: (2000.0 + dx, 1500.0 + dy),
                    },
                    &solver,
                )
                .unwrap();
            assert_in_bounds(r, image);
            assert_on_ratio(r, &ratio);
            last = r;
        }
        assert!(last.width >= DEFAULT_MIN_SIZE);

        // Returning the pointer to its start reproduces the anchor rect —
        // the session recomputes from the anchor, not from the previous
        // move, so sixty moves accumulate no drift.
        let r = session
            .apply(
                &GestureEvent::Move {
                    pointer: (2000.0, 1500.0),
                },
                &solver,
            )
            .unwrap();
        assert!((r.x - start.x).abs() < EPS, "{r:?} vs {start:?}");
        assert!((r.y - start.y).abs() < EPS, "{r:?} vs {start:?}");
        assert!((r.width - start.width).abs() < EPS);
        assert!((r.height - start.height).abs() < EPS);

        session.apply(&GestureEvent::End, &solver);
        assert!(!session.is_active());
    }
}

#[test]
fn resize_inside_bounds_pins_the_anchor_corner_exactly() {
    let image = Dimensions::new(4000, 4000);
    let solver = CropSolver::new(image, Some(AspectRatio::new(1.0, 1.0))).unwrap();
    let anchor = Rect::new(1500.0, 1500.0, 1000.0, 1000.0);

    let mut session = Session::new();
    session.begin_resize(Handle::Nw, anchor, (1500.0, 1500.0));
    for step in 1..=20 {
        let p = 1500.0 - step as f64 * 10.0;
        let r = session.pointer_move((p, 1500.0), &solver).unwrap();
        // Bottom-right corner never moves, not even by rounding.
        assert_eq!(r.right(), anchor.right());
        assert_eq!(r.bottom(), anchor.bottom());
    }
}

// ---- Drag gestures ----

#[test]
fn drag_stream_clamps_and_keeps_size() {
    let image = Dimensions::new(1000, 1000);
    let solver = CropSolver::new(image, Some(AspectRatio::new(4.0, 3.0))).unwrap();
    let start = solver.initial_placement();

    let mut session = Session::new();
    session.apply(
        &GestureEvent::Start {
            handle: None,
            pointer: (100.0, 100.0),
            rect: start,
        },
        &solver,
    );

    for (px, py) in [
        (150.0, 90.0),
        (900.0, -500.0),
        (-2000.0, 2000.0),
        (103.0, 101.0),
    ] {
        let r = session
            .apply(&GestureEvent::Move { pointer: (px, py) }, &solver)
            .unwrap();
        assert_in_bounds(r, image);
        assert_eq!((r.width, r.height), (start.width, start.height));
    }

    session.apply(&GestureEvent::End, &solver);
    assert_eq!(
        session.apply(
            &GestureEvent::Move {
                pointer: (0.0, 0.0)
            },
            &solver
        ),
        None
    );
}

// ---- Ratio switching ----

#[test]
fn every_catalog_ratio_places_and_constrains_cleanly() {
    let images = [
        Dimensions::new(4000, 3000),
        Dimensions::new(1080, 1920),
        Dimensions::new(5000, 500),
    ];
    for image in images {
        for ratio in CATALOG {
            let solver = CropSolver::new(image, Some(ratio)).unwrap();
            let r = solver.initial_placement();
            assert_in_bounds(r, image);
            assert!((r.aspect() - ratio.aspect()).abs() < 1e-6, "{ratio:?}");

            // The constrained initial placement is a fixed point.
            let c = solver.constrain(r);
            assert_eq!(solver.constrain(c), c);
            assert_in_bounds(c, image);
        }
    }
}

// ---- Dimension edits ----

#[test]
fn typed_dimensions_follow_the_ratio_and_stay_inside() {
    let image = Dimensions::new(1000, 1000);
    let ratio = AspectRatio::named(16.0, 9.0, "Widescreen");
    let solver = CropSolver::new(image, Some(ratio)).unwrap();
    let current = solver.initial_placement();

    // An absurdly large width is scaled down proportionally, not rejected.
    let r = solver.dimension_edit(Field::Width, 5000, current);
    assert_in_bounds(r, image);
    assert_on_ratio(r, &ratio);

    // A sane width maps height straight through the ratio.
    let r = solver.dimension_edit(Field::Width, 800, current);
    assert!((r.width - 800.0).abs() < EPS);
    assert!((r.height - 450.0).abs() < EPS);
}

// ---- Formatting round-out ----

#[test]
fn reduced_ratio_labels_match_their_sources() {
    assert_eq!(reduce(1920, 1080).unwrap(), (16, 9));
    assert_eq!(format_ratio(4000, 3000).unwrap(), "4:3");
    assert_eq!(format_ratio(210, 297).unwrap(), "70:99");
}
