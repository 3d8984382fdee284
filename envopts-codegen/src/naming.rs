//! Identifier derivation for generated items.

use std::borrow::Cow;

use envopts_core::{GenerationConfig, to_pascal_case, upper_first};

use crate::{
    builder::Visibility,
    model::{FieldDescriptor, TypeDescriptor},
};

/// Names of every generated item for one target type.
///
/// Capitalisation of the helpers follows the target type's export status,
/// so an exported and a private type can share one module without their
/// helpers colliding (`FromFooEnv` vs `fromFooEnv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    pub type_name: String,
    pub option_type: String,
    pub first_letter_constructor: &'static str,
    pub first_letter_aggregator: &'static str,
    /// Empty when the option type is the default `Option`.
    pub option_suffix: String,
    pub function_prefix: String,
    pub visibility: Visibility,
}

impl Naming {
    pub fn resolve(config: &GenerationConfig, descriptor: &TypeDescriptor) -> Self {
        let exported = descriptor.is_exported;
        Self {
            type_name: descriptor.name.clone(),
            option_type: config.option_type_name.clone(),
            first_letter_constructor: if exported { "F" } else { "f" },
            first_letter_aggregator: if exported { "A" } else { "a" },
            option_suffix: if config.has_custom_option_type() {
                config.option_type_name.clone()
            } else {
                String::new()
            },
            function_prefix: config.function_prefix.clone(),
            visibility: if exported {
                Visibility::Public
            } else {
                Visibility::Super
            },
        }
    }

    /// `FromFooEnv` / `fromFooEnv`
    pub fn from_struct(&self) -> String {
        format!(
            "{}rom{}",
            self.first_letter_constructor,
            upper_first(&self.type_name)
        )
    }

    /// `ParseEnv` / `RabEnvOptionParseEnv`
    pub fn parse_env(&self) -> String {
        format!("{}ParseEnv", self.option_suffix)
    }

    /// `ApplyOptions` / `applyFooOptions`
    pub fn apply(&self) -> String {
        format!("{}pply{}s", self.first_letter_aggregator, self.option_type)
    }

    /// Setter for one field: prefix, PascalCase field name, option suffix.
    pub fn setter(&self, field: &FieldDescriptor) -> String {
        format!(
            "{}{}{}",
            self.function_prefix,
            to_pascal_case(field.plain_name()),
            self.option_suffix
        )
    }

    /// Setter parameter type for `field`, valid inside the generated module.
    ///
    /// The option alias shadows any same-named root in the field's type text,
    /// so a leading path segment equal to the alias is redirected: prelude
    /// names to their absolute path, anything else through `super::`.
    /// `Self` has no meaning in a free function and becomes the target type.
    pub fn param_type<'a>(&self, field: &'a FieldDescriptor) -> Cow<'a, str> {
        let text = field.type_text.as_str();
        let mut out = String::new();
        let mut copied = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if !is_ident_char(c) {
                continue;
            }
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if !is_ident_char(next) {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }
            if c.is_ascii_digit() || !is_path_root(&text[..start], &text[end..]) {
                continue;
            }

            let ident = &text[start..end];
            let replacement = if ident == "Self" {
                self.type_name.clone()
            } else if ident == self.option_type {
                shadowed_path(ident)
            } else {
                continue;
            };
            out.push_str(&text[copied..start]);
            out.push_str(&replacement);
            copied = end;
        }

        if copied == 0 {
            Cow::Borrowed(text)
        } else {
            out.push_str(&text[copied..]);
            Cow::Owned(out)
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A type path root: not a later segment, lifetime, raw ident or binding name.
fn is_path_root(before: &str, after: &str) -> bool {
    let before = before.trim_end();
    let after = after.trim_start();
    !(before.ends_with("::")
        || before.ends_with('\'')
        || before.ends_with('#')
        || (after.starts_with('=') && !after.starts_with("==")))
}

fn shadowed_path(ident: &str) -> String {
    match ident {
        "Option" => "::core::option::Option".to_string(),
        "Result" => "::core::result::Result".to_string(),
        "Box" => "::std::boxed::Box".to_string(),
        "Vec" => "::std::vec::Vec".to_string(),
        "String" => "::std::string::String".to_string(),
        other => format!("super::{other}"),
    }
}
