//! Identifier checks and source span lookup for manifest values.

use miette::SourceSpan;

use crate::{Result, SourceContext};

/// Rust reserved keywords that cannot be used as identifiers
/// Source: https://doc.rust-lang.org/reference/keywords.html
pub(crate) const RUST_KEYWORDS: &[&str] = &[
    // Strict keywords
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
    // Reserved keywords
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
    // Weak keywords
    "union",
];

pub(crate) fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Spans of every `key = "value"` assignment in the source, in order.
///
/// The span covers the value without its quotes.
pub(crate) fn find_value_spans(src: &str, key: &str, value: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();
    for (line_start, line) in line_offsets(src) {
        let Some(rest) = line.trim_start().strip_prefix(key) else {
            continue;
        };
        let Some(rest) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let quoted = rest
            .strip_prefix('"')
            .or_else(|| rest.strip_prefix('\''));
        if let Some(inner) = quoted
            && inner.starts_with(value)
            && inner[value.len()..].starts_with(['"', '\''])
        {
            let start = line_start + (line.len() - inner.len());
            spans.push(SourceSpan::from((start, value.len())));
        }
    }
    spans
}

/// Span of the `n`th `[[target]]` header.
pub(crate) fn find_target_span(src: &str, n: usize) -> Option<SourceSpan> {
    line_offsets(src)
        .filter(|(_, line)| line.trim() == "[[target]]")
        .nth(n)
        .map(|(start, line)| {
            let indent = line.len() - line.trim_start().len();
            SourceSpan::from((start + indent, "[[target]]".len()))
        })
}

fn line_offsets(src: &str) -> impl Iterator<Item = (usize, &str)> {
    src.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line.trim_end_matches(['\r', '\n'])))
    })
}

/// Validate that a name is a valid Rust identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if name == "_" {
        return Some("a lone underscore is not an identifier");
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

/// Checks manifest values against one source for error reporting.
pub(crate) struct Checker<'a> {
    ctx: &'a SourceContext,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(ctx: &'a SourceContext) -> Self {
        Self { ctx }
    }

    fn span(&self, key: &str, value: &str) -> Option<SourceSpan> {
        find_value_spans(self.ctx.src(), key, value).into_iter().next()
    }

    /// A name used as a Rust item on its own (`type`, `option-type`).
    pub(crate) fn item_name(&self, key: &str, value: &str) -> Result<()> {
        if is_rust_keyword(value) {
            return Err(self
                .ctx
                .reserved_keyword_error(value, key, self.span(key, value)));
        }
        self.fragment(key, value)
    }

    /// A name only ever glued to other text (`prefix`); keywords are fine and
    /// so is the empty string.
    pub(crate) fn fragment(&self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() && key == "prefix" {
            return Ok(());
        }
        match validate_identifier(value) {
            Some(reason) => Err(self.ctx.invalid_identifier_error(
                value,
                key,
                reason,
                self.span(key, value),
            )),
            None => Ok(()),
        }
    }

    /// An attribute path such as `env` or `procenv::env`.
    pub(crate) fn path(&self, key: &str, value: &str) -> Result<()> {
        for segment in value.split("::") {
            if is_rust_keyword(segment) {
                return Err(self
                    .ctx
                    .reserved_keyword_error(segment, key, self.span(key, value)));
            }
            if let Some(reason) = validate_identifier(segment) {
                return Err(self.ctx.invalid_identifier_error(
                    value,
                    key,
                    reason,
                    self.span(key, value),
                ));
            }
        }
        Ok(())
    }
}
