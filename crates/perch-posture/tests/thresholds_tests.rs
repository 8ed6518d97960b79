use perch_posture::{HeadLowMode, Thresholds};

#[test]
fn test_default_tuning() {
    let thresholds = Thresholds::default();
    assert_eq!(thresholds.head_tilt_deg(), 20.0);
    assert_eq!(thresholds.lying_head(), 0.7);
    assert_eq!(thresholds.hunch_angle_deg(), 25.0);
    assert_eq!(thresholds.min_confidence(), 0.4);
    assert_eq!(thresholds.head_low_mode(), HeadLowMode::AbsoluteOffset);
}

#[test]
fn test_builder_overrides() {
    let thresholds = Thresholds::new()
        .with_head_tilt_deg(12.5)
        .with_lying_head(1.2)
        .with_hunch_angle_deg(30.0)
        .with_min_confidence(0.6)
        .with_head_low_mode(HeadLowMode::ShoulderRatio);
    assert_eq!(thresholds.head_tilt_deg(), 12.5);
    assert_eq!(thresholds.lying_head(), 1.2);
    assert_eq!(thresholds.hunch_angle_deg(), 30.0);
    assert_eq!(thresholds.min_confidence(), 0.6);
    assert_eq!(thresholds.head_low_mode(), HeadLowMode::ShoulderRatio);
}
