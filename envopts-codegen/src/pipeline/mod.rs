//! Run orchestration.
//!
//! A [`Generator`] walks one target type through every stage and records
//! the transitions in a [`RunContext`]:
//!
//! ```ignore
//! use envopts_codegen::pipeline::{Generator, RunContext};
//!
//! let mut ctx = RunContext::new();
//! let outcome = Generator::new(config).run_in(&mut ctx)?;
//! println!("finished in {}", ctx.stage());
//! ```

mod context;
mod runner;
mod stage;

pub use context::RunContext;
pub use runner::Generator;
pub use stage::Stage;
