// src/util.rs — Shared utility functions

/// Single-line preview of model text for log fields.
///
/// Newlines collapse to spaces; anything past `max_chars` characters is cut
/// and marked with "…".
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let mut out: String = flat.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}
