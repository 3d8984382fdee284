//! Emission of the options module text.

use std::collections::HashMap;

use envopts_core::{GenerationConfig, provenance_header};

use crate::{
    builder::{CodeBuilder, Fn, Param, TypeAlias},
    error::{Error, Result},
    model::{FieldDescriptor, SourcePackage, TypeDescriptor},
    naming::Naming,
};

const BOX: &str = "::std::boxed::Box";
const DEFAULT: &str = "::core::default::Default::default()";
const ALLOW_NON_SNAKE: &str = "allow(non_snake_case)";

/// Generated module text plus the number of setters it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub type_name: String,
    /// Provenance line, kept separately so formatting can re-attach it.
    pub header: String,
    /// Everything after the provenance line.
    pub body: String,
    pub setter_count: usize,
}

impl GeneratedUnit {
    /// No eligible field: nothing worth writing.
    pub fn is_empty(&self) -> bool {
        self.setter_count == 0
    }

    /// Full unformatted file text.
    pub fn text(&self) -> String {
        format!("{}\n{}", self.header, self.body)
    }
}

/// Everything the emitter reads for one target type.
#[derive(Debug, Clone, Copy)]
pub struct EmitInput<'a> {
    pub config: &'a GenerationConfig,
    pub package: &'a SourcePackage,
    pub descriptor: &'a TypeDescriptor,
    pub eligible: &'a [&'a FieldDescriptor],
    pub naming: &'a Naming,
}

/// Build the options module for `input.descriptor`.
///
/// Always produces the full text; callers decide what an empty unit means.
/// Fails when two items would share a name, e.g. fields `foo_bar` and `fooBar`.
#[tracing::instrument(skip_all, fields(type_name = %input.descriptor.name))]
pub fn emit(input: EmitInput<'_>) -> Result<GeneratedUnit> {
    let EmitInput {
        config,
        package,
        descriptor,
        eligible,
        naming,
    } = input;

    let type_name = &descriptor.name;
    let option = &naming.option_type;
    let runtime = &config.runtime_crate;
    let vis = naming.visibility;
    check_names(type_name, naming, eligible)?;

    let mut code = CodeBuilder::new();
    emit_preamble(&mut code, config, package, type_name);

    code.push_blank().emit(
        &TypeAlias::new(
            option,
            format!("{BOX}<dyn ::core::ops::FnOnce(&mut {type_name})>"),
        )
        .doc(format!("A functional option for [`{type_name}`]."))
        .visibility(vis),
    );

    let from_struct = naming.from_struct();
    code.push_blank().emit(
        &Fn::new(&from_struct)
            .doc("Replace the whole target with `v`, typically to seed defaults.")
            .attr(ALLOW_NON_SNAKE)
            .visibility(vis)
            .param(Param::new("v", type_name))
            .returns(option)
            .body_block(
                format!("{BOX}::new(move |o: &mut {type_name}| {{"),
                &["*o = v;"],
                "})",
            ),
    );

    code.push_blank().emit(
        &Fn::new(naming.parse_env())
            .doc(format!(
                "Read a default [`{type_name}`] from the environment described by `eo`."
            ))
            .attr(ALLOW_NON_SNAKE)
            .visibility(vis)
            .param(Param::new("eo", format!("&{runtime}::Options")))
            .returns(format!(
                "::core::result::Result<::std::vec::Vec<{option}>, {runtime}::Error>"
            ))
            .body_line(format!("let mut o: {type_name} = {DEFAULT};"))
            .body_line(format!("{runtime}::parse(&mut o, eo)?;"))
            .body_line(format!(
                "::core::result::Result::Ok(::std::vec![{from_struct}(o)])"
            )),
    );

    code.push_blank().emit(
        &Fn::new(naming.apply())
            .doc(format!(
                "Build a [`{type_name}`] from its declared defaults, then apply `opts` in order."
            ))
            .attr(ALLOW_NON_SNAKE)
            .visibility(vis)
            .param(Param::new(
                "opts",
                format!("impl ::core::iter::IntoIterator<Item = {option}>"),
            ))
            .returns(type_name)
            .body_line(format!("let mut res: {type_name} = {DEFAULT};"))
            .body_line(format!(
                "let _ = {runtime}::parse(&mut res, &{runtime}::Options::isolated());"
            ))
            .body_block("for opt in opts {", &["opt(&mut res);"], "}")
            .body_line("res"),
    );

    for field in eligible {
        let assign = format!("o.{} = v;", field.name);
        code.push_blank().emit(
            &Fn::new(naming.setter(field))
                .attr(ALLOW_NON_SNAKE)
                .visibility(vis)
                .param(Param::new("v", naming.param_type(field)))
                .returns(option)
                .body_block(
                    format!("{BOX}::new(move |o: &mut {type_name}| {{"),
                    &[assign.as_str()],
                    "})",
                ),
        );
    }

    tracing::debug!(setters = eligible.len(), "emitted");
    Ok(GeneratedUnit {
        type_name: type_name.clone(),
        header: provenance_header(&config.invocation()),
        body: code.build(),
        setter_count: eligible.len(),
    })
}

/// Every generated function name must be unique within the module.
fn check_names(type_name: &str, naming: &Naming, eligible: &[&FieldDescriptor]) -> Result<()> {
    let mut taken: HashMap<String, String> = [
        naming.from_struct(),
        naming.parse_env(),
        naming.apply(),
    ]
    .into_iter()
    .map(|helper| (helper, "a generated helper".to_string()))
    .collect();

    for field in eligible {
        let name = naming.setter(field);
        let owner = format!("field `{}`", field.name);
        if let Some(first) = taken.insert(name.clone(), owner.clone()) {
            return Err(Box::new(Error::NameCollision {
                type_name: type_name.to_string(),
                name,
                first,
                second: owner,
            }));
        }
    }
    Ok(())
}

/// Module anchor and the copied imports.
fn emit_preamble(
    code: &mut CodeBuilder,
    config: &GenerationConfig,
    package: &SourcePackage,
    type_name: &str,
) {
    code.push_inner_doc(&format!(
        "Functional options for `{}` in module `{}`.",
        type_name, package.name
    ));
    code.push_blank().push_line("use super::*;");

    let own_module = config
        .output_path_in(&package.child_dir)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());

    for import in &package.imports {
        if import.root.is_some() && import.root == own_module {
            continue;
        }
        code.push_line("#[allow(unused_imports)]")
            .push_lines(&import.text);
    }
}
