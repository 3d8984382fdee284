//! Generate operation - one generator run per target.

use envopts_codegen::Generator;
use envopts_core::GenerationConfig;

use crate::reports::{GenerateReport, TargetResult};

/// Options for the generate operation.
pub struct GenerateOptions {
    /// Render files without writing them.
    pub dry_run: bool,
}

/// Run every target in order, stopping at the first failure.
pub fn generate(targets: &[GenerationConfig], opts: GenerateOptions) -> GenerateReport {
    let mut report = GenerateReport::default();

    for config in targets {
        let generator = Generator::new(config.clone());
        let result = if opts.dry_run {
            generator.preview().map(|file| match file {
                Some(file) => TargetResult::Preview {
                    path: file.path().to_path_buf(),
                    content: file.render(),
                },
                None => TargetResult::Skipped {
                    type_name: config.type_name.clone(),
                },
            })
        } else {
            generator.run().map(TargetResult::from)
        };

        match result {
            Ok(result) => report.results.push(result),
            Err(error) => {
                report.error = Some(error);
                break;
            }
        }
    }

    report
}
