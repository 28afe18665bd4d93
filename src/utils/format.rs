//! Display helpers for the presentation layer

/// Accent colors assigned to timers by position
pub const ACCENT_COLORS: [&str; 10] = [
    "blue", "green", "red", "yellow", "teal", "orange", "pink", "brown", "purple", "indigo",
];

/// Neutral accent for timers beyond the palette
pub const FALLBACK_ACCENT: &str = "secondary";

/// Format remaining seconds as `m:ss`
pub fn timestamp(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Accent color for the timer at position `id`
pub fn accent_color(id: usize) -> &'static str {
    ACCENT_COLORS.get(id).copied().unwrap_or(FALLBACK_ACCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(timestamp(65), "1:05");
        assert_eq!(timestamp(0), "0:00");
        assert_eq!(timestamp(15 * 60), "15:00");
        assert_eq!(timestamp(24 * 60 * 60), "1440:00");
    }

    #[test]
    fn accents_fall_back_past_the_palette() {
        assert_eq!(accent_color(0), "blue");
        assert_eq!(accent_color(9), "indigo");
        assert_eq!(accent_color(10), FALLBACK_ACCENT);
    }
}
