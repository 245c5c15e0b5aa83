//! Color configuration for the reading session.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Colors the session layout draws with. The accent is overridden by the
/// preview feed's color when preview mode is active.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub accent: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub title_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub muted: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            title_fg: Color::Black,
            selection_fg: Color::White,
            muted: Color::DarkGray,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

/// Custom deserializer supporting named colors and hex codes.
pub(crate) fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a color string into a ratatui Color.
///
/// Accepts the 17 named terminal colors (case-insensitive) plus "#RRGGBB"
/// and "#RGB" hex forms.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let channel = |range: &str| {
        u8::from_str_radix(range, 16).map_err(|_| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #RGB shorthand doubles each nibble
        3 => Ok(Color::Rgb(
            channel(&hex[0..1])? * 0x11,
            channel(&hex[1..2])? * 0x11,
            channel(&hex[2..3])? * 0x11,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("DarkGrey").unwrap(), Color::DarkGray);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            parse_color_string("#FF8800").unwrap(),
            Color::Rgb(255, 136, 0)
        );
        assert_eq!(parse_color_string("#0000ff").unwrap(), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_parse_short_hex_colors() {
        assert_eq!(parse_color_string("#F00").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(
            parse_color_string("#FFF").unwrap(),
            Color::Rgb(255, 255, 255)
        );
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("chartreuse-ish").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
    }
}
