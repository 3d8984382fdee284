//! Environment-backed configuration types used by the generator tests.

use std::time::Duration;

use envopts_runtime::Options as EnvOptions;
use std::io::Write as _;

#[derive(Debug, Default)]
pub struct FooEnv {
    #[env(var = "HOME")]
    pub home: String,
    #[env(var = "PORT", default = "3000")]
    pub port: u16,
    #[env(var = "PASSWORD", unset)]
    pub password: String,
    #[env(var = "PRODUCTION")]
    pub is_production: bool,
    #[env(var = "HOSTS", separator = ":")]
    pub hosts: Vec<String>,
    #[env(var = "DURATION")]
    pub duration: Duration,
    #[env(var = "TEMP_FOLDER", default = "${HOME}/tmp", expand)]
    pub temp_folder: String,

    // external type, one tag shared by two fields
    #[env(var = "FOO")]
    pub foo: Vec<envopts_runtime::Options>,
    #[env(var = "FOO")]
    pub dar: Vec<envopts_runtime::Options>,
    #[env(var = "MAYBE")]
    pub maybe: Option<u16>,

    pub untagged: u8,
    #[env(var = "INTERNAL")]
    pub(crate) internal: String,
}

/// Only a private field, so nothing is generated.
#[derive(Debug, Default)]
pub struct BarEnv {
    #[env(var = "FOO")]
    bar: String,
}

#[derive(Debug, Default)]
pub struct RabEnv {
    #[env(var = "HOME")]
    pub home: String,
}

/// Private version of FooEnv.
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
struct fooEnv {
    #[env(var = "HOSTS", separator = ":")]
    pub hosts: Vec<String>,
    #[env(var = "DURATION")]
    pub duration: Duration,
    pub extra: Option<EnvOptions>,
}

/// Names itself, and a type that can double as an option alias.
#[derive(Debug, Default)]
pub struct LinkEnv {
    #[env(var = "NEXT")]
    pub next: Option<Box<Self>>,
    #[env(var = "HOOK")]
    pub hook: Option<Hook>,
}

#[derive(Debug, Default)]
pub struct Hook;

pub enum Mode {
    Dev,
    Prod,
}
