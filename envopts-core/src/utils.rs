//! Shared utility functions for identifier generation.

/// Convert a string to PascalCase (e.g., "temp_folder" -> "TempFolder")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(upper_first)
        .collect()
}

/// Upper-case the first character, leaving the rest untouched (e.g., "fooEnv" -> "FooEnv")
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Strip the `r#` marker from a raw identifier
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}
