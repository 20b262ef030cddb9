// Host-side tests for iris measurement, smoothing and tracking state.

use glam::Vec2;
use parallax_core::*;

const EPS: f32 = 1e-4;

/// A face with 478 points where the left iris ring forms the given box.
fn face_with_iris(min: Vec2, max: Vec2, width: u32, height: u32) -> Vec<LandmarkPoint> {
    let (w, h) = (width as f32, height as f32);
    let mut face = vec![LandmarkPoint::new(0.5, 0.5); 478];
    let c = (min + max) * 0.5;
    face[474] = LandmarkPoint::new(max.x / w, c.y / h);
    face[475] = LandmarkPoint::new(c.x / w, min.y / h);
    face[476] = LandmarkPoint::new(min.x / w, c.y / h);
    face[477] = LandmarkPoint::new(c.x / w, max.y / h);
    face
}

fn frame_with_iris(center: Vec2, iris_px: f32, width: u32, height: u32) -> LandmarkFrame {
    let half = Vec2::splat(iris_px * 0.5);
    LandmarkFrame::single(
        width,
        height,
        face_with_iris(center - half, center + half, width, height),
    )
}

#[test]
fn iris_box_center_and_width_in_pixels() {
    let face = face_with_iris(Vec2::new(300.0, 200.0), Vec2::new(340.0, 230.0), 640, 480);
    let b = IrisBox::from_landmarks(&face, &LEFT_IRIS_LANDMARKS, 640, 480, false).unwrap();
    assert!((b.center() - Vec2::new(320.0, 215.0)).length() < 1e-3);
    assert!((b.width() - 40.0).abs() < 1e-3);
}

#[test]
fn iris_box_mirror_flips_x() {
    let face = face_with_iris(Vec2::new(100.0, 200.0), Vec2::new(140.0, 240.0), 640, 480);
    let b = IrisBox::from_landmarks(&face, &LEFT_IRIS_LANDMARKS, 640, 480, true).unwrap();
    assert!((b.center().x - (640.0 - 120.0)).abs() < 1e-3);
    assert!((b.center().y - 220.0).abs() < 1e-3);
    assert!((b.width() - 40.0).abs() < 1e-3);
}

#[test]
fn iris_box_rejects_short_face_and_empty_frame() {
    let face = vec![LandmarkPoint::new(0.5, 0.5); 100];
    let err = IrisBox::from_landmarks(&face, &LEFT_IRIS_LANDMARKS, 640, 480, false).unwrap_err();
    assert_eq!(
        err,
        LandmarkError::MissingLandmark {
            index: 474,
            len: 100
        }
    );
    let face = vec![LandmarkPoint::new(0.5, 0.5); 478];
    let err = IrisBox::from_landmarks(&face, &LEFT_IRIS_LANDMARKS, 0, 480, false).unwrap_err();
    assert!(matches!(err, LandmarkError::EmptyFrame { .. }));
}

#[test]
fn distance_matches_closed_form_regression_value() {
    let sample = RawEyeSample {
        center: Vec2::new(320.0, 320.0),
        iris_width_px: 100.0,
        frame_width: 640,
        frame_height: 640,
    };
    // focal = 640 * 1.40625 = 900; (900 * 11.7 / 100) / 10 = 10.53
    let cm = sample
        .distance_cm(IRIS_DIAMETER_MM, NORMALIZED_FOCAL_X)
        .expect("valid width");
    assert!((cm - 10.53).abs() < EPS, "got {cm}");
}

#[test]
fn distance_uses_shorter_frame_side() {
    let sample = RawEyeSample {
        center: Vec2::ZERO,
        iris_width_px: 100.0,
        frame_width: 640,
        frame_height: 480,
    };
    let cm = sample.distance_cm(IRIS_DIAMETER_MM, NORMALIZED_FOCAL_X).unwrap();
    let expected = (480.0 * 1.40625 * 11.7 / 100.0) / 10.0;
    assert!((cm - expected).abs() < EPS);
}

#[test]
fn zero_iris_width_yields_no_distance() {
    let sample = RawEyeSample {
        center: Vec2::new(10.0, 10.0),
        iris_width_px: 0.0,
        frame_width: 640,
        frame_height: 480,
    };
    assert_eq!(sample.distance_cm(IRIS_DIAMETER_MM, NORMALIZED_FOCAL_X), None);
}

#[test]
fn degenerate_iris_holds_previous_distance() {
    let mut est = GazeEstimator::default();
    est.observe(&frame_with_iris(Vec2::new(320.0, 240.0), 20.0, 640, 480))
        .unwrap();
    let before = est.state().estimated_distance_cm;
    assert!(before.is_finite());

    let state = est
        .observe(&frame_with_iris(Vec2::new(330.0, 240.0), 0.0, 640, 480))
        .unwrap();
    assert_eq!(state.estimated_distance_cm, before);
    assert!(state.smoothed_position.is_finite());
    assert!(state.face_detected);
}

#[test]
fn smoothing_converges_monotonically() {
    let target = Vec2::new(0.8, -0.6);
    let mut s = Vec2::ZERO;
    let mut ticks = 0;
    loop {
        let next = smoothing_step(s, target, SMOOTHING_ALPHA, MOVEMENT_THRESHOLD);
        if next == s {
            break;
        }
        assert!(next.x >= s.x && next.x <= target.x, "x overshoot at tick {ticks}");
        assert!(next.y <= s.y && next.y >= target.y, "y overshoot at tick {ticks}");
        s = next;
        ticks += 1;
        assert!(ticks < 100, "did not settle");
    }
    assert!((target.x - s.x).abs() <= MOVEMENT_THRESHOLD);
    assert!((target.y - s.y).abs() <= MOVEMENT_THRESHOLD);

    // 0.7^13 < 1%: within 13 ticks the residual is under 1% of the start gap
    let mut s = Vec2::ZERO;
    for _ in 0..13 {
        s = smoothing_step(s, Vec2::new(1.0, 0.0), SMOOTHING_ALPHA, 0.0);
    }
    assert!(1.0 - s.x < 0.01, "residual {}", 1.0 - s.x);
}

#[test]
fn dead_zone_leaves_position_exactly_unchanged() {
    let s = Vec2::new(0.1, 0.2);
    for target in [
        Vec2::new(0.11, 0.2),
        Vec2::new(0.1, 0.219),
        Vec2::new(0.085, 0.185),
    ] {
        assert_eq!(
            smoothing_step(s, target, SMOOTHING_ALPHA, MOVEMENT_THRESHOLD),
            s
        );
    }
    // one axis over the threshold moves both axes
    let moved = smoothing_step(s, Vec2::new(0.2, 0.21), SMOOTHING_ALPHA, MOVEMENT_THRESHOLD);
    assert!((moved.x - 0.13).abs() < 1e-6);
    assert!((moved.y - 0.203).abs() < 1e-6);
}

#[test]
fn face_loss_keeps_smoothed_position_and_resets_sequence() {
    let mut est = GazeEstimator::default();
    est.observe(&frame_with_iris(Vec2::new(480.0, 120.0), 20.0, 640, 480))
        .unwrap();
    est.latch_sequence(std::time::Duration::from_secs(1));
    let tracked = est.state();
    assert!(tracked.face_detected);
    assert!(tracked.has_started_sequence());

    let lost = est.observe(&LandmarkFrame::no_face(640, 480)).unwrap();
    assert!(!lost.face_detected);
    assert_eq!(lost.sequence, SequencePhase::Idle);
    assert_eq!(lost.smoothed_position, tracked.smoothed_position);
    assert_eq!(lost.estimated_distance_cm, tracked.estimated_distance_cm);
}

#[test]
fn repeated_face_loss_is_idempotent() {
    let mut est = GazeEstimator::default();
    est.observe(&frame_with_iris(Vec2::new(200.0, 300.0), 25.0, 640, 480))
        .unwrap();
    let first = est.observe_no_face();
    for _ in 0..5 {
        assert_eq!(est.observe_no_face(), first);
    }
}

#[test]
fn malformed_frame_leaves_state_untouched() {
    let mut est = GazeEstimator::default();
    est.observe(&frame_with_iris(Vec2::new(200.0, 300.0), 25.0, 640, 480))
        .unwrap();
    let before = est.state();
    let bad = LandmarkFrame::single(640, 480, vec![LandmarkPoint::new(0.1, 0.1); 10]);
    assert!(est.observe(&bad).is_err());
    assert_eq!(est.state(), before);
}

#[test]
fn non_finite_iris_point_is_rejected_without_touching_state() {
    let mut est = GazeEstimator::default();
    est.observe(&frame_with_iris(Vec2::new(200.0, 300.0), 25.0, 640, 480))
        .unwrap();
    let before = est.state();
    let mut face = face_with_iris(
        Vec2::new(300.0, 200.0),
        Vec2::new(320.0, 220.0),
        640,
        480,
    );
    face[475] = LandmarkPoint::new(f32::NAN, 0.4);
    let err = est
        .observe(&LandmarkFrame::single(640, 480, face))
        .unwrap_err();
    assert_eq!(err, LandmarkError::NonFinite { index: 475 });
    assert_eq!(est.state(), before);
}

#[test]
fn first_non_empty_face_drives_the_estimate() {
    let face_a = face_with_iris(
        Vec2::new(390.0, 290.0),
        Vec2::new(410.0, 310.0),
        640,
        480,
    );
    let face_b = face_with_iris(
        Vec2::new(90.0, 90.0),
        Vec2::new(130.0, 130.0),
        640,
        480,
    );
    let frame = LandmarkFrame::new(640, 480, vec![vec![], face_a.clone(), face_b]);
    assert_eq!(frame.primary_face(), Some(face_a.as_slice()));

    let mut est = GazeEstimator::default();
    let state = est.observe(&frame).unwrap();
    assert!(state.face_detected);
    assert!((state.raw_position - Vec2::new(0.25, -0.25)).length() < 1e-5);
}

#[test]
fn reset_drops_smoothed_position_and_distance() {
    let mut est = GazeEstimator::default();
    let iris = IrisBox {
        min: Vec2::new(390.0, 290.0),
        max: Vec2::new(410.0, 310.0),
    };
    let state = est.observe_sample(RawEyeSample::from_box(&iris, 640, 480));
    assert!(state.face_detected);
    assert!((state.smoothed_position - Vec2::new(0.075, -0.075)).length() < 1e-5);
    assert!(state.estimated_distance_cm != DEFAULT_DISTANCE_CM);

    est.reset();
    let state = est.state();
    assert_eq!(state.smoothed_position, Vec2::ZERO);
    assert_eq!(state.estimated_distance_cm, DEFAULT_DISTANCE_CM);
    assert!(!state.face_detected);
    assert_eq!(state.sequence, SequencePhase::Idle);

    let shared = SharedGaze::default();
    shared
        .observe(&frame_with_iris(Vec2::new(400.0, 300.0), 20.0, 640, 480))
        .unwrap();
    shared.reset();
    assert_eq!(shared.snapshot(), GazeState::default());
}

#[test]
fn first_detection_moves_thirty_percent_toward_ndc() {
    let mut est = GazeEstimator::default();
    let state = est.observe(&LandmarkFrame::no_face(640, 480)).unwrap();
    assert_eq!(state.smoothed_position, Vec2::ZERO);
    assert_eq!(state.estimated_distance_cm, DEFAULT_DISTANCE_CM);

    let state = est
        .observe(&frame_with_iris(Vec2::new(400.0, 300.0), 20.0, 640, 480))
        .unwrap();
    // (400, 300) in 640x480 -> NDC (0.25, -0.25)
    assert!((state.raw_position - Vec2::new(0.25, -0.25)).length() < 1e-5);
    assert!((state.smoothed_position - Vec2::new(0.075, -0.075)).length() < 1e-5);
    assert_eq!(state.sequence, SequencePhase::Armed);
}

#[test]
fn shared_handle_sees_perception_updates_from_another_thread() {
    let shared = SharedGaze::default();
    let producer = shared.clone();
    std::thread::spawn(move || {
        producer
            .observe(&frame_with_iris(Vec2::new(160.0, 120.0), 20.0, 640, 480))
            .unwrap();
    })
    .join()
    .unwrap();
    let snap = shared.snapshot();
    assert!(snap.face_detected);
    assert!(snap.smoothed_position.x < 0.0 && snap.smoothed_position.y > 0.0);
}
