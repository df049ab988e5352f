//! Filename sanitization for naming fragments and prefixes

/// Strip every character that is not alphanumeric, underscore, hyphen,
/// period, or space. Total and idempotent; permitted characters keep
/// their relative order.
pub fn clean_filename_part(part: &str) -> String {
    part.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '))
        .collect()
}
