//! Colors used by the row list.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Theme colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Page background
    pub background: Color,
    /// Expansion panel background
    pub panel: Color,
    /// Text on the background and the panel
    pub text: Color,
    /// Mute button background
    pub button_background: Color,
    /// Mute button label
    pub button_text: Color,
    /// Row separator
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(0x5a, 0x95, 0xff),
            panel: Color::from_rgb8(0x1c, 0x25, 0x41),
            text: Color::WHITE,
            button_background: Color::WHITE,
            button_text: Color::from_rgb8(0x1c, 0x25, 0x41),
            border: Color::WHITE.with_alpha(0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_matches_hex() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::from_hex("#5a95ff").unwrap());
        assert_eq!(theme.panel, Color::from_hex("#1C2541").unwrap());
        assert_eq!(theme.border.a, 0.5);
    }
}
