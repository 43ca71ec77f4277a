//! Theme and the colors the route view paints with.

use crate::canvas::Color;
use serde::{Deserialize, Serialize};

/// Application theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light page background
    Light,
    /// Dark page background
    #[default]
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Colors for this theme
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Light => Palette::LIGHT,
            Self::Dark => Palette::DARK,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Colors used by the route renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Loaded (revenue) edge
    pub revenue_edge: Color,
    /// Deadhead edge
    pub deadhead_edge: Color,
    /// Edge annotation text
    pub annotation: Color,
    /// Waypoint fill
    pub node_fill: Color,
    /// Waypoint outline and label
    pub node_outline: Color,
    /// Truck body
    pub truck_body: Color,
    /// Truck cab
    pub truck_cab: Color,
    /// Truck wheels
    pub truck_wheel: Color,
    /// Placeholder road surface
    pub road: Color,
    /// Placeholder road center line
    pub road_line: Color,
}

impl Palette {
    /// Light page colors
    pub const LIGHT: Self = Self {
        revenue_edge: Color::from_hex(0x2ecc71),
        deadhead_edge: Color::from_hex(0xe74c3c),
        annotation: Color::from_hex(0x34495e),
        node_fill: Color::from_hex(0x4a90e2),
        node_outline: Color::from_hex(0x2c3e50),
        truck_body: Color::from_hex(0x3498db),
        truck_cab: Color::from_hex(0x2980b9),
        truck_wheel: Color::from_hex(0x2c3e50),
        road: Color::from_hex(0x555555),
        road_line: Color::from_hex(0xf1c40f),
    };

    /// Dark page colors; labels lighten, edges and trucks keep their hue
    pub const DARK: Self = Self {
        annotation: Color::from_hex(0xbdc3c7),
        node_outline: Color::from_hex(0xecf0f1),
        road: Color::from_hex(0x2c2c2c),
        ..Self::LIGHT
    };
}

impl Default for Palette {
    fn default() -> Self {
        Theme::default().palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("LIGHT".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_edge_colors_shared_across_themes() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_eq!(light.revenue_edge, dark.revenue_edge);
        assert_eq!(light.deadhead_edge, dark.deadhead_edge);
        assert_eq!(light.truck_body, dark.truck_body);
        assert_ne!(light.annotation, dark.annotation);
    }

    #[test]
    fn test_theme_json() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap_or_default(), "\"dark\"");
    }
}
