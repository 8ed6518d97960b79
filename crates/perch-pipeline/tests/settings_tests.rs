use perch_pipeline::PipelineSettings;

#[test]
fn test_defaults() {
    let settings = PipelineSettings::default();
    assert!(settings.detection_enabled());
    assert_eq!(settings.detect_stride(), 5);
}

#[test]
fn test_stride_is_clamped_to_one() {
    let settings = PipelineSettings::new(true, 0);
    assert_eq!(settings.detect_stride(), 1);

    settings.set_detect_stride(0);
    assert_eq!(settings.detect_stride(), 1);

    settings.set_detect_stride(7);
    assert_eq!(settings.detect_stride(), 7);
}

#[test]
fn test_stride_selects_every_mth_sequence() {
    let settings = PipelineSettings::new(true, 20);
    let sampled: Vec<u64> = (1..=100).filter(|&seq| settings.should_detect(seq)).collect();
    assert_eq!(sampled, vec![20, 40, 60, 80, 100]);
}

#[test]
fn test_stride_one_samples_everything() {
    let settings = PipelineSettings::new(true, 1);
    assert!((1..=50).all(|seq| settings.should_detect(seq)));
}

#[test]
fn test_disabled_detection_samples_nothing() {
    let settings = PipelineSettings::new(false, 1);
    assert!(!(1..=50).any(|seq| settings.should_detect(seq)));
}

#[test]
fn test_runtime_toggle() {
    let settings = PipelineSettings::new(true, 1);
    assert!(settings.should_detect(3));

    settings.set_detection_enabled(false);
    assert!(!settings.should_detect(4));

    settings.set_detection_enabled(true);
    assert!(settings.should_detect(5));
}
