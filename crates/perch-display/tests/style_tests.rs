use perch_display::{StatusLine, state_color};
use perch_posture::{PostureResult, PostureState};

#[test]
fn test_state_colors() {
    assert_eq!(state_color(PostureState::NormalSitting), [0, 255, 0]);
    assert_eq!(state_color(PostureState::HunchedBack), [255, 128, 0]);
    assert_eq!(state_color(PostureState::LyingOnTable), [255, 0, 0]);
    assert_eq!(state_color(PostureState::Unknown), [128, 128, 128]);
    assert_eq!(
        state_color(PostureState::LeaningForward),
        state_color(PostureState::HeadTilted)
    );
}

#[test]
fn test_for_state_carries_description_icon_and_color() {
    let status = StatusLine::for_state(PostureState::HunchedBack);
    assert_eq!(status.text, "Hunch");
    assert_eq!(status.icon, PostureState::HunchedBack.icon());
    assert_eq!(status.color, [255, 128, 0]);
}

#[test]
fn test_from_result_appends_the_confidence() {
    let mut result = PostureResult::unknown();
    result.state = PostureState::NormalSitting;
    result.confidence = 0.875;

    let status = StatusLine::from_result(&result);
    assert_eq!(status.text, "Normal (87.5%)");
    assert_eq!(status.icon, PostureState::NormalSitting.icon());
    assert_eq!(status.color, [0, 255, 0]);
}

#[test]
fn test_no_person_status() {
    let status = StatusLine::no_person();
    assert_eq!(status.text, "No person detected");
    assert_eq!(status.color, [128, 128, 128]);
}

#[test]
fn test_detector_unavailable_is_distinct_and_red() {
    let status = StatusLine::detector_unavailable();
    assert_eq!(status.color, [255, 0, 0]);
    assert_ne!(status.text, StatusLine::no_person().text);
    assert_ne!(status.text, StatusLine::for_state(PostureState::Unknown).text);
}
