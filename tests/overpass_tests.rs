use flypast::{point_overpass, track_overpass, FlypastError, Overpass, RefineMode, Track};
use hifitime::{Duration, Epoch};

fn t0() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2024, 8, 20)
}

/// Evenly spaced epochs starting at `start_s` seconds past `t0`.
fn epochs(start_s: f64, step_s: f64, n: usize) -> Vec<Epoch> {
    (0..n)
        .map(|i| t0() + Duration::from_seconds(start_s + step_s * i as f64))
        .collect()
}

#[test]
fn point_overpass_hits_the_matching_sample() {
    // Track along the equator: (0,0), (0,1), (0,2); target exactly on the
    // middle sample.
    let track = Track::new(epochs(0.0, 60.0, 3), vec![0.0; 3], vec![0.0, 1.0, 2.0]).unwrap();
    let event = point_overpass(&track, 0.0, 1.0).unwrap();
    assert!(event.distance < 1e-6);
    assert_eq!(event.time, track.times()[1]);
}

#[test]
fn point_overpass_off_track_target() {
    let track = Track::new(epochs(0.0, 60.0, 3), vec![0.0; 3], vec![0.0, 1.0, 2.0]).unwrap();
    // Target between the first two samples: nearest sample wins, distance is
    // bounded by the sample spacing, not zero.
    let event = point_overpass(&track, 0.0, 0.4).unwrap();
    assert_eq!(event.time, track.times()[0]);
    assert!(event.distance > 1_000.0);
}

#[test]
fn point_overpass_rejects_empty_track() {
    let track = Track::new(vec![], vec![], vec![]).unwrap();
    assert_eq!(
        point_overpass(&track, 0.0, 0.0).unwrap_err(),
        FlypastError::EmptyTrack
    );
}

#[test]
fn identical_tracks_give_zero_distance_in_both_modes() {
    let track = Track::new(
        epochs(0.0, 120.0, 20),
        (0..20).map(|i| -1.0 + 0.1 * i as f64).collect(),
        (0..20).map(|i| 5.0 + 0.05 * i as f64).collect(),
    )
    .unwrap();

    let coarse = track_overpass(&track, &track, RefineMode::CoarseOnly).unwrap();
    let refined = track_overpass(&track, &track, RefineMode::CoarseThenRefine).unwrap();
    assert!(coarse.distance < 1e-6);
    assert!(refined.distance < 1e-6);
    assert!((coarse.distance - refined.distance).abs() < 1e-6);
}

#[test]
fn refinement_recovers_sub_sample_crossing() {
    // A runs south-to-north along lon 0, B west-to-east along lat 0, both
    // over one hour. They meet at (0, 0) at t = 1800 s, which is not a
    // sample epoch of either track (samples every 400 s).
    let times = epochs(0.0, 400.0, 10);
    let a = Track::new(
        times.clone(),
        (0..10).map(|i| -0.5 + (400.0 * i as f64) / 3600.0).collect(),
        vec![0.0; 10],
    )
    .unwrap();
    let b = Track::new(
        times,
        vec![0.0; 10],
        (0..10).map(|i| -0.5 + (400.0 * i as f64) / 3600.0).collect(),
    )
    .unwrap();

    let coarse = track_overpass(&a, &b, RefineMode::CoarseOnly).unwrap();
    // Coarse resolution is limited to the grid: closest grid epochs are
    // 1600 s and 2000 s, several kilometers away from the true crossing.
    assert!(coarse.distance > 1_000.0);
    assert!(a.times().contains(&coarse.time));

    let refined = track_overpass(&a, &b, RefineMode::CoarseThenRefine).unwrap();
    assert!(refined.distance < coarse.distance);
    assert!(refined.distance < 1.0);
    let dt = (refined.time - t0()).to_seconds();
    assert!((dt - 1800.0).abs() < 1.0, "refined crossing at {dt} s");
}

#[test]
fn refined_time_stays_inside_the_overlap_window() {
    // B covers only the tail of A; the closest approach sits at the window
    // edge and refinement must not walk out of it.
    let a = Track::new(
        epochs(0.0, 300.0, 12),
        (0..12).map(|i| i as f64 * 0.1).collect(),
        vec![0.0; 12],
    )
    .unwrap();
    let b = Track::new(
        epochs(1800.0, 300.0, 12),
        (0..12).map(|i| 2.0 + i as f64 * 0.1).collect(),
        vec![0.0; 12],
    )
    .unwrap();

    let refined = track_overpass(&a, &b, RefineMode::CoarseThenRefine).unwrap();
    let (b_start, _) = (b.times()[0], b.times()[b.len() - 1]);
    let (_, a_end) = (a.times()[0], a.times()[a.len() - 1]);
    assert!(refined.time >= b_start);
    assert!(refined.time <= a_end);
}

#[test]
fn disjoint_time_spans_are_an_empty_overlap() {
    let a = Track::new(epochs(0.0, 60.0, 5), vec![0.0; 5], vec![0.0; 5]).unwrap();
    let b = Track::new(epochs(10_000.0, 60.0, 5), vec![0.0; 5], vec![0.0; 5]).unwrap();
    assert_eq!(
        track_overpass(&a, &b, RefineMode::CoarseOnly).unwrap_err(),
        FlypastError::EmptyOverlap
    );
    assert_eq!(
        track_overpass(&a, &b, RefineMode::CoarseThenRefine).unwrap_err(),
        FlypastError::EmptyOverlap
    );
}

#[test]
fn empty_track_is_rejected_before_overlap_checks() {
    let a = Track::new(vec![], vec![], vec![]).unwrap();
    let b = Track::new(epochs(0.0, 60.0, 5), vec![0.0; 5], vec![0.0; 5]).unwrap();
    assert_eq!(
        track_overpass(&a, &b, RefineMode::CoarseOnly).unwrap_err(),
        FlypastError::EmptyTrack
    );
}

#[test]
fn overpass_results_serialize() {
    let track = Track::new(epochs(0.0, 60.0, 3), vec![0.0; 3], vec![0.0, 1.0, 2.0]).unwrap();
    let event = point_overpass(&track, 0.0, 1.0).unwrap();
    let json = serde_json::to_string(&event).unwrap();
    let back: Overpass = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}
