use std::collections::HashMap;

/// The options bag handed to [`ParseEnv`](crate::ParseEnv) implementations.
///
/// `environment` of `None` means the live process environment. An empty
/// map isolates parsing from the process so only declared defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub environment: Option<HashMap<String, String>>,
    /// Prepended to every variable name before lookup.
    pub prefix: String,
    /// Treat fields without a declared default as required.
    pub required_if_no_default: bool,
}

impl Options {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from an empty environment; only defaults are applied.
    pub fn isolated() -> Self {
        Self {
            environment: Some(HashMap::new()),
            ..Self::default()
        }
    }

    /// Read from the given variables instead of the process environment.
    pub fn with_environment(mut self, environment: HashMap<String, String>) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Add one variable, switching to an explicit environment if needed.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn required_if_no_default(mut self) -> Self {
        self.required_if_no_default = true;
        self
    }

    /// Variable name after applying the prefix.
    pub fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Look up a variable by its unprefixed name.
    pub fn lookup(&self, name: &str) -> Option<String> {
        let key = self.key(name);
        match &self.environment {
            Some(environment) => environment.get(&key).cloned(),
            None => std::env::var(&key).ok(),
        }
    }

    /// Whether lookups go to the process environment.
    pub fn uses_process_environment(&self) -> bool {
        self.environment.is_none()
    }
}
