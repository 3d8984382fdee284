//! Source loading: find the module, parse it, describe the target struct.

mod imports;
mod package;

use std::path::Path;

use envopts_core::GenerationConfig;
use proc_macro2::{LineColumn, TokenStream};
use quote::ToTokens;
use syn::{AttrStyle, Attribute, Fields, Item, ItemStruct, Visibility};

pub use package::{ModuleFile, resolve};

use crate::{
    error::{Error, Result},
    model::{FieldDescriptor, LoadedType, SourcePackage, TypeDescriptor},
};

const BOM: char = '\u{feff}';

/// Resolve `config.source`, parse it and describe `config.type_name`.
#[tracing::instrument(skip_all, fields(type_name = %config.type_name, source = %config.source.display()))]
pub fn load(config: &GenerationConfig) -> Result<LoadedType> {
    let module = resolve(&config.source)?;
    tracing::debug!(file = %module.path.display(), module = %module.name, "resolved module");

    let raw = std::fs::read_to_string(&module.path).map_err(|source| {
        Box::new(Error::Read {
            path: module.path.clone(),
            source,
        })
    })?;

    let (package, descriptor) = load_str(&raw, &module, config)?;
    Ok(LoadedType {
        package,
        descriptor,
    })
}

/// Parse module text that was already read from `module.path`.
pub fn load_str(
    raw: &str,
    module: &ModuleFile,
    config: &GenerationConfig,
) -> Result<(SourcePackage, TypeDescriptor)> {
    let src = raw.strip_prefix(BOM).unwrap_or(raw);
    let file = syn::parse_file(src)
        .map_err(|err| Error::syntax(&err, src, &module.path.display().to_string()))?;

    let item = find_struct(&file.items, &config.type_name, &module.path)?;
    let descriptor = describe(item, src, &config.tag_key)?;

    let package = SourcePackage {
        name: module.name.clone(),
        file: module.path.clone(),
        child_dir: module.child_dir.clone(),
        imports: imports::collect(&file.items),
    };

    Ok((package, descriptor))
}

fn find_struct<'a>(items: &'a [Item], type_name: &str, module: &Path) -> Result<&'a ItemStruct> {
    for item in items {
        let (ident, kind) = match item {
            Item::Struct(item) if item.ident == type_name => return Ok(item),
            Item::Enum(item) => (&item.ident, "enum"),
            Item::Union(item) => (&item.ident, "union"),
            Item::Type(item) => (&item.ident, "type alias"),
            Item::Trait(item) => (&item.ident, "trait"),
            Item::TraitAlias(item) => (&item.ident, "trait alias"),
            _ => continue,
        };
        if ident == type_name {
            return Err(Box::new(Error::NotAStruct {
                type_name: type_name.to_string(),
                kind: kind.to_string(),
            }));
        }
    }

    Err(Box::new(Error::TypeNotFound {
        type_name: type_name.to_string(),
        module: module.to_path_buf(),
    }))
}

fn describe(item: &ItemStruct, src: &str, tag_key: &str) -> Result<TypeDescriptor> {
    let name = item.ident.to_string();
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        return Err(Box::new(Error::Unsupported {
            type_name: name,
            reason: "generic structs cannot be captured by a boxed option closure".to_string(),
        }));
    }

    let fields = match &item.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| {
                let ident = field.ident.as_ref()?;
                Some(FieldDescriptor {
                    name: ident.to_string(),
                    type_text: type_text(&field.ty, src),
                    has_tag: field.attrs.iter().any(|attr| is_tag(attr, tag_key)),
                    is_exported: is_exported(&field.vis),
                })
            })
            .collect(),
        Fields::Unnamed(_) | Fields::Unit => {
            tracing::debug!(type_name = %name, "struct has no named fields");
            Vec::new()
        }
    };

    Ok(TypeDescriptor {
        name,
        is_exported: is_exported(&item.vis),
        fields,
    })
}

/// Only a bare `pub` counts; restricted visibilities stay inside the crate.
fn is_exported(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

fn is_tag(attr: &Attribute, tag_key: &str) -> bool {
    if !matches!(attr.style, AttrStyle::Outer) {
        return false;
    }
    let path = attr
        .path()
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    path == tag_key.trim_start_matches("::")
}

/// Slice the type exactly as written, keeping qualification and spacing.
fn type_text(ty: &syn::Type, src: &str) -> String {
    let tokens = ty.to_token_stream();
    match slice_tokens(&tokens, src) {
        Some(text) => text.to_string(),
        None => {
            tracing::debug!("type span unavailable, rendering from tokens");
            tokens.to_string()
        }
    }
}

fn slice_tokens<'a>(tokens: &TokenStream, src: &'a str) -> Option<&'a str> {
    let mut iter = tokens.clone().into_iter();
    let first = iter.next()?.span();
    let last = iter.last().map(|tree| tree.span()).unwrap_or(first);

    let start = offset_of(src, first.start())?;
    let end = offset_of(src, last.end())?;
    src.get(start..end)
}

/// Convert a 1-based line and 0-based char column into a byte offset.
pub(crate) fn offset_of(src: &str, position: LineColumn) -> Option<usize> {
    if position.line == 0 {
        return None;
    }
    let line_start = match position.line {
        1 => 0,
        n => src.match_indices('\n').nth(n - 2).map(|(i, _)| i + 1)?,
    };
    let line = &src[line_start..];
    let line = &line[..line.find('\n').unwrap_or(line.len())];

    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(position.column)
        .map(|column| line_start + column)
}
