//! Character substitution for archive file names.

/// Characters replaced with `-`.
pub const FORBIDDEN_CHARS: &[char] = &[
    '\\', '/', '*', '"', '[', ']', ',', '.', ':', ';', '|', '=', '<', '>', '?',
];

/// Replaces every forbidden character with `-`, then every space with `_`.
///
/// Both passes are global. Other whitespace (tabs, newlines) is kept as is.
pub fn escape_file_name(name: &str) -> String {
    name.replace(FORBIDDEN_CHARS, "-").replace(' ', "_")
}
