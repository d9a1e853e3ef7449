//! Color mode for the document.
//!
//! Style tokens live in `style/main.css`, keyed on the `data-theme` attribute
//! of the `<html>` element.

use serde::{Deserialize, Serialize};

/// Document color mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Dark background, light text.
    #[default]
    Dark,
    /// Light background, dark text.
    Light,
}

impl ColorMode {
    /// Value of the `data-theme` attribute.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dark() {
        assert_eq!(ColorMode::default(), ColorMode::Dark);
        assert_eq!(ColorMode::default().as_str(), "dark");
    }
}
