//! Helpers for building SQL `LIKE` patterns from user input.

/// Escapes `LIKE` wildcards (`%`, `_`) and the escape character itself,
/// so the input is matched literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds a pattern matching any value that contains `input`.
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}
