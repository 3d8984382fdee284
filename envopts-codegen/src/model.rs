//! Descriptors produced by the loader for one generation run.

use std::path::PathBuf;

use envopts_core::unraw;

/// A struct field as declared in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as written, raw identifiers keep their `r#` prefix.
    pub name: String,
    /// Verbatim source text of the field's type.
    pub type_text: String,
    pub has_tag: bool,
    pub is_exported: bool,
}

impl FieldDescriptor {
    /// Name with any `r#` prefix removed, used to build identifiers.
    pub fn plain_name(&self) -> &str {
        unraw(&self.name)
    }

    pub fn is_eligible(&self) -> bool {
        self.has_tag && self.is_exported
    }
}

/// The target struct, fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub is_exported: bool,
    pub fields: Vec<FieldDescriptor>,
}

/// A `use` declaration rewritten for the generated child module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// First path segment after re-anchoring, `None` for grouped roots.
    pub root: Option<String>,
    pub text: String,
}

/// The module file that declares the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePackage {
    /// Module name as seen from Rust (`config`, `crate`, ...).
    pub name: String,
    pub file: PathBuf,
    /// Directory where the module's child module files live.
    pub child_dir: PathBuf,
    pub imports: Vec<Import>,
}

/// Loader output: where the type lives and what it looks like.
#[derive(Debug, Clone)]
pub struct LoadedType {
    pub package: SourcePackage,
    pub descriptor: TypeDescriptor,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, has_tag: bool, is_exported: bool) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            type_text: "String".to_string(),
            has_tag,
            is_exported,
        }
    }

    #[test]
    fn test_plain_name_strips_raw_prefix() {
        assert_eq!(field("r#type", true, true).plain_name(), "type");
        assert_eq!(field("home", true, true).plain_name(), "home");
    }

    #[test]
    fn test_eligibility_needs_both() {
        assert!(field("a", true, true).is_eligible());
        assert!(!field("a", false, true).is_eligible());
        assert!(!field("a", true, false).is_eligible());
    }
}
