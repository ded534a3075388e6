// src/entity/appearance.rs
use crate::error::{Result, StickiesError};

pub const DEFAULT_NOTE_COLOR: &str = "#FFF9C4";

pub const COLOR_PALETTE: [&str; 8] = [
    "#FFF9C4", // yellow
    "#C8E6C9", // green
    "#BBDEFB", // blue
    "#E1BEE7", // purple
    "#FFCDD2", // red
    "#F5F5F5", // white
    "#FFCCBC", // orange
    "#DCEDC8", // light green
];

pub const FONT_SIZES: [u32; 7] = [8, 10, 12, 14, 16, 18, 24];
pub const DEFAULT_FONT_SIZE: u32 = 12;

pub const DEFAULT_POSITION: (i32, i32) = (100, 100);
pub const DEFAULT_SIZE: (i32, i32) = (300, 350);
pub const MIN_SIZE: (i32, i32) = (200, 200);
pub const MAX_SIZE: (i32, i32) = (800, 600);

/// Direction for stepping through `FONT_SIZES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStep {
    Up,
    Down,
}

/// Next allowed font size in the given direction, or `None` at either end.
///
/// `current` need not be in `FONT_SIZES`; notes loaded from disk may carry
/// any size.
pub fn next_font_size(current: u32, step: FontStep) -> Option<u32> {
    match step {
        FontStep::Up => FONT_SIZES.iter().copied().filter(|s| *s > current).min(),
        FontStep::Down => FONT_SIZES.iter().copied().filter(|s| *s < current).max(),
    }
}

pub fn validate_font_size(size: u32) -> Result<u32> {
    if FONT_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(StickiesError::InvalidFontSize(size))
    }
}

/// Accepts `#RGB` or `#RRGGBB`, returned uppercased.
pub fn validate_color(color: &str) -> Result<String> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| StickiesError::InvalidColor(color.to_string()))?;
    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StickiesError::InvalidColor(color.to_string()));
    }
    Ok(format!("#{}", hex.to_ascii_uppercase()))
}

/// Clamp a requested window size to `MIN_SIZE..=MAX_SIZE`.
pub fn clamp_size(w: i32, h: i32) -> (i32, i32) {
    (w.clamp(MIN_SIZE.0, MAX_SIZE.0), h.clamp(MIN_SIZE.1, MAX_SIZE.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_font_size_steps() {
        assert_eq!(next_font_size(12, FontStep::Up), Some(14));
        assert_eq!(next_font_size(12, FontStep::Down), Some(10));
        assert_eq!(next_font_size(18, FontStep::Up), Some(24));
    }

    #[test]
    fn test_next_font_size_at_ends() {
        assert_eq!(next_font_size(24, FontStep::Up), None);
        assert_eq!(next_font_size(8, FontStep::Down), None);
    }

    #[test]
    fn test_next_font_size_off_grid() {
        assert_eq!(next_font_size(13, FontStep::Up), Some(14));
        assert_eq!(next_font_size(13, FontStep::Down), Some(12));
        assert_eq!(next_font_size(40, FontStep::Down), Some(24));
    }

    #[test]
    fn test_validate_font_size() {
        assert_eq!(validate_font_size(16).unwrap(), 16);
        assert!(matches!(
            validate_font_size(11),
            Err(StickiesError::InvalidFontSize(11))
        ));
    }

    #[test]
    fn test_validate_color() {
        assert_eq!(validate_color("#c8e6c9").unwrap(), "#C8E6C9");
        assert_eq!(validate_color("#abc").unwrap(), "#ABC");
        assert!(validate_color("C8E6C9").is_err());
        assert!(validate_color("#C8E6C").is_err());
        assert!(validate_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_palette_colors_are_valid() {
        for color in COLOR_PALETTE {
            assert_eq!(validate_color(color).unwrap(), color);
        }
    }

    #[test]
    fn test_clamp_size() {
        assert_eq!(clamp_size(300, 350), (300, 350));
        assert_eq!(clamp_size(50, 50), MIN_SIZE);
        assert_eq!(clamp_size(5000, 5000), MAX_SIZE);
    }
}
