//! Default layer colors.

/// Color for layers with no style override and no palette entry.
pub const FALLBACK_COLOR: &str = "#bdc3c7";

/// Built-in palette for the default layer ids.
pub fn default_color(layer_id: &str) -> &'static str {
    match layer_id {
        "frontend" => "#3498db",
        "api" => "#1abc9c",
        "services" => "#e74c3c",
        "database" => "#9b59b6",
        "shared" => "#f39c12",
        "cli" => "#27ae60",
        "config" => "#7f8c8d",
        "types" => "#95a5a6",
        _ => FALLBACK_COLOR,
    }
}
