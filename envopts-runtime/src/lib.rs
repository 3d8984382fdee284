//! Environment parsing contract for envopts-generated code.
//!
//! Generated option modules call [`parse`] with a default-constructed
//! target and an [`Options`] bag. What "parsing" means (variable names,
//! declared defaults, unset-after-read, list separators, `${VAR}`
//! expansion) is decided by the [`ParseEnv`] implementation of the
//! target type, written by hand or provided by an env library.
//!
//! ```
//! use envopts_runtime::{Error, Options, ParseEnv};
//!
//! #[derive(Default)]
//! struct Config {
//!     port: u16,
//! }
//!
//! impl ParseEnv for Config {
//!     fn parse_env(&mut self, options: &Options) -> Result<(), Error> {
//!         let raw = options.lookup("PORT").unwrap_or_else(|| "3000".into());
//!         self.port = raw.parse().map_err(|e| Error::invalid("PORT", &raw, e))?;
//!         Ok(())
//!     }
//! }
//!
//! let mut config = Config::default();
//! envopts_runtime::parse(&mut config, &Options::isolated()).unwrap();
//! assert_eq!(config.port, 3000);
//! ```

mod error;
mod options;

pub use error::Error;
pub use options::Options;

/// Populate a value from environment variables.
pub trait ParseEnv {
    fn parse_env(&mut self, options: &Options) -> Result<(), Error>;
}

/// Populate `target` in place; the single entry point used by generated code.
pub fn parse<T>(target: &mut T, options: &Options) -> Result<(), Error>
where
    T: ParseEnv + ?Sized,
{
    target.parse_env(options)
}
