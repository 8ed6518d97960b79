use perch_posture::PostureState;

#[test]
fn test_default_state_is_unknown() {
    assert_eq!(PostureState::default(), PostureState::Unknown);
}

#[test]
fn test_descriptions() {
    assert_eq!(PostureState::NormalSitting.description(), "Normal");
    assert_eq!(PostureState::LeaningForward.description(), "Lean");
    assert_eq!(PostureState::HunchedBack.description(), "Hunch");
    assert_eq!(PostureState::HeadTilted.description(), "Head tilted");
    assert_eq!(PostureState::LyingOnTable.description(), "Lying");
    assert_eq!(PostureState::Unknown.description(), "Detecting...");
}

#[test]
fn test_every_state_has_an_icon() {
    let states = [
        PostureState::NormalSitting,
        PostureState::LeaningForward,
        PostureState::HunchedBack,
        PostureState::HeadTilted,
        PostureState::LyingOnTable,
        PostureState::Unknown,
    ];
    for state in states {
        assert!(!state.icon().is_empty());
    }
}

#[test]
fn test_display_matches_description() {
    assert_eq!(PostureState::LyingOnTable.to_string(), "Lying");
}
