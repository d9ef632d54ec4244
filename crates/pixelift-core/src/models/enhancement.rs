use serde::{Deserialize, Serialize};

/// A single enhancement a run can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enhancement {
    Face,
    Background,
    Text,
    Colorization,
}

impl std::fmt::Display for Enhancement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Enhancement::Face => "face",
            Enhancement::Background => "background",
            Enhancement::Text => "text",
            Enhancement::Colorization => "colorization",
        };
        f.write_str(tag)
    }
}

/// The user's enhancement toggles for one upload session. Not persisted;
/// lives only until the session is cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementSelection {
    pub face: bool,
    pub background: bool,
    pub text: bool,
    pub colorization: bool,
}

impl EnhancementSelection {
    /// True when no toggle is on. Submission requires at least one.
    pub fn is_empty(&self) -> bool {
        !(self.face || self.background || self.text || self.colorization)
    }

    /// Active toggles in fixed order: face, background, text, colorization.
    pub fn active(&self) -> Vec<Enhancement> {
        let mut tags = Vec::new();
        if self.face {
            tags.push(Enhancement::Face);
        }
        if self.background {
            tags.push(Enhancement::Background);
        }
        if self.text {
            tags.push(Enhancement::Text);
        }
        if self.colorization {
            tags.push(Enhancement::Colorization);
        }
        tags
    }
}

/// The upload endpoint takes the flags as literal "true"/"false" strings
/// in the multipart form.
pub fn flag_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
