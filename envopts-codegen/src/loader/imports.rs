//! Copy `use` declarations into a form valid one module deeper.

use syn::{
    Ident, Item, ItemUse, UseGroup, UsePath, UseTree, Visibility, punctuated::Punctuated,
    token::PathSep,
};

use crate::model::Import;

/// Collect the top-level `use` items of a module, re-anchored for a child module.
pub fn collect(items: &[Item]) -> Vec<Import> {
    items
        .iter()
        .filter_map(|item| match item {
            Item::Use(item) => rewrite(item),
            _ => None,
        })
        .collect()
}

fn rewrite(item: &ItemUse) -> Option<Import> {
    let tree = drop_anonymous(&item.tree)?;
    let tree = reanchor(tree);

    let copied = ItemUse {
        attrs: item
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .cloned()
            .collect(),
        vis: Visibility::Inherited,
        leading_colon: item.leading_colon,
        tree,
        ..item.clone()
    };

    Some(Import {
        root: root_segment(&copied.tree),
        text: render(copied),
    })
}

/// Remove `as _` imports, which only bring traits into scope.
fn drop_anonymous(tree: &UseTree) -> Option<UseTree> {
    match tree {
        UseTree::Rename(rename) if rename.rename == "_" => None,
        UseTree::Path(path) => drop_anonymous(&path.tree).map(|rest| {
            UseTree::Path(UsePath {
                tree: Box::new(rest),
                ..path.clone()
            })
        }),
        UseTree::Group(group) => {
            let items: Punctuated<UseTree, syn::token::Comma> =
                group.items.iter().filter_map(drop_anonymous).collect();
            if items.is_empty() {
                None
            } else {
                Some(UseTree::Group(UseGroup {
                    brace_token: group.brace_token,
                    items,
                }))
            }
        }
        other => Some(other.clone()),
    }
}

/// Rewrite relative roots: `self::` becomes `super::`, `super::` gains one more level.
fn reanchor(tree: UseTree) -> UseTree {
    match tree {
        UseTree::Path(mut path) if path.ident == "self" => {
            path.ident = Ident::new("super", path.ident.span());
            UseTree::Path(path)
        }
        UseTree::Path(path) if path.ident == "super" => UseTree::Path(UsePath {
            ident: Ident::new("super", path.ident.span()),
            colon2_token: PathSep::default(),
            tree: Box::new(UseTree::Path(path)),
        }),
        UseTree::Group(mut group) => {
            group.items = group.items.into_iter().map(reanchor).collect();
            UseTree::Group(group)
        }
        other => other,
    }
}

fn root_segment(tree: &UseTree) -> Option<String> {
    match tree {
        UseTree::Path(path) => Some(path.ident.to_string()),
        UseTree::Name(name) => Some(name.ident.to_string()),
        UseTree::Rename(rename) => Some(rename.ident.to_string()),
        UseTree::Glob(_) | UseTree::Group(_) => None,
    }
}

fn render(item: ItemUse) -> String {
    let file = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items: vec![Item::Use(item)],
    };
    prettyplease::unparse(&file).trim_end().to_string()
}
