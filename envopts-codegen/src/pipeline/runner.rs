//! Generation run orchestrator.

use envopts_core::{File, GenerationConfig};

use super::{RunContext, Stage};
use crate::{
    emit::{EmitInput, GeneratedUnit, emit},
    error::Result,
    filter::eligible,
    loader::load,
    model::SourcePackage,
    naming::Naming,
    output::{ImportCleaner, Outcome, OutputPipeline, Rustfmt},
};

/// Drives one type through load, filter, naming, emission and output.
///
/// ```ignore
/// let outcome = Generator::new(GenerationConfig::new("FooEnv").with_source("src/config.rs"))
///     .run()?;
/// ```
pub struct Generator {
    config: GenerationConfig,
    output: OutputPipeline,
}

impl Generator {
    /// A generator that cleans up with `rustfmt`.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            output: OutputPipeline::new(Rustfmt::new()),
        }
    }

    /// Replace the import cleaner that runs after the file is written.
    pub fn with_cleaner(mut self, cleaner: impl ImportCleaner + 'static) -> Self {
        self.output = OutputPipeline::new(cleaner);
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn run(&self) -> Result<Outcome> {
        self.run_in(&mut RunContext::new())
    }

    /// Run, recording stage transitions in `ctx`.
    #[tracing::instrument(skip_all, fields(type_name = %self.config.type_name))]
    pub fn run_in(&self, ctx: &mut RunContext) -> Result<Outcome> {
        let result = self.prepare(ctx).and_then(|(package, unit)| {
            self.output
                .process_with(&self.config, &package, &unit, &mut |stage| ctx.advance(stage))
        });

        match &result {
            Ok(Outcome::Written { path, setter_count }) => {
                tracing::info!(path = %path.display(), setters = setter_count, "written");
            }
            Ok(Outcome::Skipped { type_name }) => {
                tracing::info!(type_name = %type_name, "skipped: no exported, tagged fields");
            }
            Err(err) => ctx.fail(err),
        }
        result
    }

    /// Everything up to the formatted file, without writing it.
    pub fn preview(&self) -> Result<Option<File>> {
        let mut ctx = RunContext::new();
        let (package, unit) = self.prepare(&mut ctx)?;
        self.output.preview(&self.config, &package, &unit)
    }

    fn prepare(&self, ctx: &mut RunContext) -> Result<(SourcePackage, GeneratedUnit)> {
        let loaded = load(&self.config)?;
        ctx.advance(Stage::Loaded);

        let fields = eligible(&loaded.descriptor);
        ctx.advance(Stage::Filtered);

        let naming = Naming::resolve(&self.config, &loaded.descriptor);
        let unit = emit(EmitInput {
            config: &self.config,
            package: &loaded.package,
            descriptor: &loaded.descriptor,
            eligible: &fields,
            naming: &naming,
        })?;
        ctx.advance(Stage::Emitted);

        Ok((loaded.package, unit))
    }
}
