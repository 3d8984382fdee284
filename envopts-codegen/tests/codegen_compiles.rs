//! Generated code must build and behave inside a real crate.
//!
//! Field attributes other than built-in ones need a derive to register
//! them, so this crate tags fields with doc comments (`--tag doc`).
//! Runs `cargo test` in a scratch crate; ignored by default.

use std::{fs, path::Path, process::Command};

use envopts_codegen::Generator;
use envopts_core::GenerationConfig;
use tempfile::TempDir;

const CONFIG_RS: &str = r#"use std::time::Duration;

use envopts_runtime::{Error, Options, ParseEnv};

pub mod fooenv_opts;

pub use fooenv_opts::{
    ApplyOptions, FromFooEnv, WithHome, WithMaybe, WithNext, WithPort, WithTimeout,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FooEnv {
    /// HOME
    pub home: String,
    /// PORT
    pub port: u16,
    /// TIMEOUT
    pub timeout: Duration,
    /// MAYBE
    pub maybe: Option<u16>,
    /// NEXT
    pub next: Option<Box<Self>>,
    pub untagged: u8,
}

impl Default for FooEnv {
    fn default() -> Self {
        Self {
            home: String::new(),
            port: 0,
            timeout: Duration::from_secs(0),
            maybe: None,
            next: None,
            untagged: 0,
        }
    }
}

impl ParseEnv for FooEnv {
    fn parse_env(&mut self, options: &Options) -> Result<(), Error> {
        self.port = 8080;
        if let Some(home) = options.lookup("HOME") {
            self.home = home;
        }
        if let Some(port) = options.lookup("PORT") {
            self.port = port
                .parse()
                .map_err(|e| Error::invalid(options.key("PORT"), port.clone(), e))?;
        }
        Ok(())
    }
}
"#;

const LIB_RS: &str = r#"pub mod config;

#[cfg(test)]
mod tests {
    use envopts_runtime::Options;

    use crate::config::*;

    #[test]
    fn apply_starts_from_declared_defaults() {
        let env = ApplyOptions([WithHome("/root".to_string())]);
        assert_eq!(env.home, "/root");
        assert_eq!(env.port, 8080);
    }

    #[test]
    fn last_option_wins() {
        let env = ApplyOptions([WithPort(1), WithPort(2)]);
        assert_eq!(env.port, 2);
    }

    #[test]
    fn optional_and_self_typed_fields() {
        let inner = ApplyOptions([WithPort(1)]);
        let env = ApplyOptions([WithMaybe(Some(5)), WithNext(Some(Box::new(inner.clone())))]);
        assert_eq!(env.maybe, Some(5));
        assert_eq!(env.next.as_deref(), Some(&inner));
    }

    #[test]
    fn parse_env_reads_options() {
        let options = Options::isolated().with_prefix("APP_").with_var("APP_PORT", "9000");
        let opts = fooenv_parse(&options).unwrap();
        let env = ApplyOptions(opts);
        assert_eq!(env.port, 9000);
    }

    #[test]
    fn from_struct_replaces_everything() {
        let mut source = FooEnv::default();
        source.untagged = 7;
        let env = ApplyOptions([WithPort(1), FromFooEnv(source.clone())]);
        assert_eq!(env, source);
    }

    fn fooenv_parse(
        options: &Options,
    ) -> Result<Vec<fooenv_opts::Option>, envopts_runtime::Error> {
        fooenv_opts::ParseEnv(options)
    }
}
"#;

fn write_crate(root: &Path) {
    let runtime = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("envopts-runtime");
    fs::write(
        root.join("Cargo.toml"),
        format!(
            "[package]\nname = \"scratch\"\nversion = \"0.1.0\"\nedition = \"2024\"\n\n[dependencies]\nenvopts-runtime = {{ path = {:?} }}\n\n[workspace]\n",
            runtime.display().to_string()
        ),
    )
    .unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src").join("lib.rs"), LIB_RS).unwrap();
    fs::write(root.join("src").join("config.rs"), CONFIG_RS).unwrap();
}

#[test]
#[ignore = "runs cargo in a scratch crate"]
fn test_generated_options_compile_and_apply() {
    let temp = TempDir::new().unwrap();
    write_crate(temp.path());

    let config = GenerationConfig::new("FooEnv")
        .with_tag("doc")
        .with_source(temp.path().join("src").join("config.rs"));
    let outcome = Generator::new(config).run().expect("generation failed");
    assert_eq!(
        outcome.path(),
        Some(temp.path().join("src").join("config").join("fooenv_opts.rs").as_path())
    );

    let output = Command::new("cargo")
        .args(["test", "--quiet"])
        .current_dir(temp.path())
        .output()
        .expect("failed to run cargo test");

    if !output.status.success() {
        let generated =
            fs::read_to_string(temp.path().join("src").join("config").join("fooenv_opts.rs"))
                .unwrap_or_default();
        panic!(
            "generated code failed!\n\n{}\n\nstdout:\n{}\n\nstderr:\n{}",
            generated,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
