use perch_posture::{PostureResult, PostureState};

const GREEN: [u8; 3] = [0, 255, 0];
const YELLOW: [u8; 3] = [255, 255, 0];
const ORANGE: [u8; 3] = [255, 128, 0];
const RED: [u8; 3] = [255, 0, 0];
const GREY: [u8; 3] = [128, 128, 128];

/// Indicator color for a posture state.
pub fn state_color(state: PostureState) -> [u8; 3] {
    match state {
        PostureState::NormalSitting => GREEN,
        PostureState::LeaningForward => YELLOW,
        PostureState::HunchedBack => ORANGE,
        PostureState::HeadTilted => YELLOW,
        PostureState::LyingOnTable => RED,
        PostureState::Unknown => GREY,
    }
}

/// One line of posture status for the UI, with an icon glyph and an RGB
/// indicator color.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub icon: &'static str,
    pub color: [u8; 3],
}

impl StatusLine {
    /// Status for a posture state, without a confidence figure.
    pub fn for_state(state: PostureState) -> Self {
        Self {
            text: state.description().to_string(),
            icon: state.icon(),
            color: state_color(state),
        }
    }

    /// Status for a classification result, with the confidence appended.
    pub fn from_result(result: &PostureResult) -> Self {
        Self {
            text: format!(
                "{} ({:.1}%)",
                result.state.description(),
                result.confidence * 100.0
            ),
            icon: result.state.icon(),
            color: state_color(result.state),
        }
    }

    /// Shown when a detection pass found nobody in the frame.
    pub fn no_person() -> Self {
        Self {
            text: "No person detected".to_string(),
            icon: "\u{2753}",
            color: GREY,
        }
    }

    /// Shown when the pose detector failed to initialize. Capture and
    /// display keep running without it.
    pub fn detector_unavailable() -> Self {
        Self {
            text: "Pose detector unavailable".to_string(),
            icon: "\u{26A0}",
            color: RED,
        }
    }
}
