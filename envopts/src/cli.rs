use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use envopts_core::{
    DEFAULT_FUNCTION_PREFIX, DEFAULT_OPTION_TYPE, DEFAULT_RUNTIME_CRATE, DEFAULT_TAG_KEY,
    GenerationConfig,
};
use eyre::Result;

use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T, E> UnwrapOrExit<T> for std::result::Result<T, Box<E>>
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(*e),
        }
    }
}

pub(crate) fn exit_with<E>(error: E) -> !
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    eprintln!("{:?}", miette::Report::new(error));
    std::process::exit(1);
}

/// Flags that change how a run reports, not what it generates.
const UNRECORDED_FLAGS: [&str; 3] = ["--dry-run", "-v", "--verbose"];

/// Command line as written into the provenance header.
///
/// Only flags that affect the generated text are kept, so a dry run
/// previews byte-identical output and `-v` does not dirty generated files.
pub(crate) fn recorded_invocation(args: impl IntoIterator<Item = String>) -> String {
    args.into_iter()
        .filter(|arg| !UNRECORDED_FLAGS.contains(&arg.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate functional options for structs whose fields carry an
/// environment tag.
#[derive(Parser, Debug)]
#[command(name = "envopts")]
#[command(version)]
#[command(group(ArgGroup::new("target").required(true).args(["type_name", "manifest"])))]
pub(crate) struct Cli {
    /// Struct to generate options for
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: Option<String>,

    /// Name of the generated option type
    #[arg(long, value_name = "NAME", default_value = DEFAULT_OPTION_TYPE, conflicts_with = "manifest")]
    pub option_type: String,

    /// Prefix of every generated setter
    #[arg(long, default_value = DEFAULT_FUNCTION_PREFIX, conflicts_with = "manifest")]
    pub prefix: String,

    /// Output file (defaults to <module dir>/<type>_opts.rs)
    #[arg(short, long, conflicts_with = "manifest")]
    pub output: Option<PathBuf>,

    /// Field attribute to scan for
    #[arg(long, default_value = DEFAULT_TAG_KEY, conflicts_with = "manifest")]
    pub tag: String,

    /// Module file or directory declaring the type
    #[arg(long, default_value = ".", conflicts_with = "manifest")]
    pub source: PathBuf,

    /// Crate path the generated code calls for environment parsing
    #[arg(long, default_value = DEFAULT_RUNTIME_CRATE, conflicts_with = "manifest")]
    pub runtime_crate: String,

    /// Generate every target listed in an envopts.toml
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Print the generated files instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(&self, invocation: &str) -> Result<()> {
        let targets = self.targets(invocation);
        let report = ops::generate(
            &targets,
            GenerateOptions {
                dry_run: self.dry_run,
            },
        );

        report.render(&mut TerminalOutput::new());
        if let Some(error) = report.error {
            exit_with(*error);
        }
        Ok(())
    }

    /// One config per target: the manifest entries, or the flags.
    fn targets(&self, invocation: &str) -> Vec<GenerationConfig> {
        if let Some(manifest) = &self.manifest {
            return envopts_manifest::parse_file(manifest)
                .unwrap_or_exit()
                .into_targets();
        }

        let Some(type_name) = &self.type_name else {
            return Vec::new();
        };
        let mut config = GenerationConfig::new(type_name)
            .with_option_type(&self.option_type)
            .with_prefix(&self.prefix)
            .with_tag(&self.tag)
            .with_source(&self.source)
            .with_runtime_crate(&self.runtime_crate)
            .with_invocation(invocation);
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        vec![config]
    }
}
