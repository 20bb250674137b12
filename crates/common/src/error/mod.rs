pub mod diagnostics;

pub use diagnostics::DiagnosticMessage;

/// Shortens `text` to at most `max` characters, appending `...` when cut.
///
/// Used to keep statement text readable in logs and error contexts.
pub fn truncate_for_display(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    cut
}
