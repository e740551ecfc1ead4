//! Additive per-channel color math.
//!
//! Lighten/darken shift each RGB channel by `percent × 2.55` with
//! clamping — not HSL. Callers wanting perceptual uniformity should
//! supply exact colors via the style map instead.

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn shift(color: &str, delta: f64) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => {
            let adjust =
                |c: u8| -> u8 { (f64::from(c) + delta).clamp(0.0, 255.0).round() as u8 };
            format!("#{:02x}{:02x}{:02x}", adjust(r), adjust(g), adjust(b))
        }
        // Unparseable colors pass through untouched.
        None => color.to_string(),
    }
}

/// Lighten by `percent` (additive, clamped).
pub fn lighten(color: &str, percent: f64) -> String {
    shift(color, percent * 2.55)
}

/// Darken by `percent` (additive, clamped).
pub fn darken(color: &str, percent: f64) -> String {
    shift(color, -(percent * 2.55))
}
