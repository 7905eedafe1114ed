//! Free-text normalization for priority and status answers
//!
//! The core only accepts canonical names (`Medium`, `In Progress`, ...), so
//! the shell maps common spellings onto them before building a ticket.

/// Map a typed priority or status onto its canonical spelling
///
/// Unknown values are returned trimmed but otherwise unchanged, so the
/// ticket constructor can reject them with a proper message.
pub fn normalize_choice(input: &str) -> String {
    let trimmed = input.trim();
    let canonical = match trimmed.to_lowercase().as_str() {
        "low" => "Low",
        "medium" | "med" => "Medium",
        "high" => "High",
        "open" => "Open",
        "in progress" | "in-progress" | "progress" => "In Progress",
        "closed" | "close" => "Closed",
        _ => trimmed,
    };
    canonical.to_string()
}
