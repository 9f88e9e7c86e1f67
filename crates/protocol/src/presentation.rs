use serde::{Deserialize, Serialize};

/// Semantic presentation flags. The host maps each one to a class name on
/// the element; the core only reasons about the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Presentation {
    /// Element has entered the viewport and played its reveal transition.
    Visible,
    /// Navbar chrome past the scroll threshold.
    Scrolled,
    /// Open mobile menu/overlay, highlighted nav link, selected service card.
    Active,
    /// Form field container while its field has focus.
    Focused,
    /// Form field container while its field holds a value.
    Filled,
    /// Body once initialisation has run.
    Loaded,
}

impl Presentation {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Scrolled => "scrolled",
            Self::Active => "active",
            Self::Focused => "focused",
            Self::Filled => "filled",
            Self::Loaded => "loaded",
        }
    }
}

impl std::fmt::Display for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_class_name() {
        for flag in [
            Presentation::Visible,
            Presentation::Scrolled,
            Presentation::Active,
            Presentation::Focused,
            Presentation::Filled,
            Presentation::Loaded,
        ] {
            let json = serde_json::to_string(&flag).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", flag.class_name()));
        }
    }
}
