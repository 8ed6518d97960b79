use std::fmt;

/// Posture category reported by the classifier.
///
/// [`Unknown`](PostureState::Unknown) is the state before any detection has
/// been classified and whenever no subject is found in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostureState {
    NormalSitting,
    LeaningForward,
    HunchedBack,
    HeadTilted,
    LyingOnTable,
    Unknown,
}

impl PostureState {
    /// Short human-readable label for status lines.
    pub fn description(&self) -> &'static str {
        match self {
            PostureState::NormalSitting => "Normal",
            PostureState::LeaningForward => "Lean",
            PostureState::HunchedBack => "Hunch",
            PostureState::HeadTilted => "Head tilted",
            PostureState::LyingOnTable => "Lying",
            PostureState::Unknown => "Detecting...",
        }
    }

    /// Icon glyph shown next to the description.
    pub fn icon(&self) -> &'static str {
        match self {
            PostureState::NormalSitting => "\u{2705}",
            PostureState::LeaningForward => "\u{2B06}",
            PostureState::HunchedBack => "\u{1F422}",
            PostureState::HeadTilted => "\u{1F914}",
            PostureState::LyingOnTable => "\u{1F634}",
            PostureState::Unknown => "\u{2753}",
        }
    }
}

impl Default for PostureState {
    fn default() -> Self {
        PostureState::Unknown
    }
}

impl fmt::Display for PostureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
