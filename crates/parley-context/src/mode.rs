use std::fmt;

use crate::templates::{CODING_PREAMBLE, CONCISE_PREAMBLE, GENERAL_PREAMBLE, TUTOR_PREAMBLE};

/// Response style selected by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    General,
    Tutor,
    Coding,
    Concise,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::General, Mode::Tutor, Mode::Coding, Mode::Concise];

    /// Resolve a client-supplied tag. Matching is exact and case-sensitive;
    /// anything unrecognized, or no tag at all, is `General`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("tutor") => Mode::Tutor,
            Some("coding") => Mode::Coding,
            Some("concise") => Mode::Concise,
            _ => Mode::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::General => "general",
            Mode::Tutor => "tutor",
            Mode::Coding => "coding",
            Mode::Concise => "concise",
        }
    }

    pub fn preamble(&self) -> &'static str {
        match self {
            Mode::General => GENERAL_PREAMBLE,
            Mode::Tutor => TUTOR_PREAMBLE,
            Mode::Coding => CODING_PREAMBLE,
            Mode::Concise => CONCISE_PREAMBLE,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_tag(Some(mode.as_str())), mode);
        }
    }

    #[test]
    fn test_fallback_to_general() {
        assert_eq!(Mode::from_tag(None), Mode::General);
        assert_eq!(Mode::from_tag(Some("philosopher")), Mode::General);
        assert_eq!(Mode::from_tag(Some("")), Mode::General);
        assert_eq!(Mode::from_tag(Some("Tutor")), Mode::General);
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(Mode::Concise.to_string(), "concise");
        assert_eq!(Mode::default(), Mode::General);
    }
}
