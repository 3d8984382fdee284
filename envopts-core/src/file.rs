use std::{
    io,
    path::{Path, PathBuf},
};

/// Marker that closes the first line of every generated file.
pub const DO_NOT_EDIT: &str = "DO NOT EDIT.";

/// Build the provenance line for a generated file.
///
/// Follows the `// Code generated ... DO NOT EDIT.` convention so that
/// linters and review tools recognise the file as machine-written.
pub fn provenance_header(invocation: &str) -> String {
    format!("// Code generated by \"{}\"; {}", invocation, DO_NOT_EDIT)
}

/// Check whether file content starts with a provenance line.
pub fn is_generated(content: &str) -> bool {
    content.lines().next().is_some_and(|line| {
        line.starts_with("// Code generated ") && line.ends_with(DO_NOT_EDIT)
    })
}

/// A generated file waiting to be written.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given path and content (default rules: always overwrite, no header)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Prepend `header` as the first line when rendering.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.rules.header = Some(header.into());
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the full file content, header first
    pub fn render(&self) -> String {
        match &self.rules.header {
            Some(header) => format!("{}\n{}", header, self.content),
            None => self.content.clone(),
        }
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Check whether the file on disk exists but was not produced by a generator.
    pub fn is_handwritten_on_disk(&self) -> bool {
        std::fs::read_to_string(&self.path).is_ok_and(|existing| !is_generated(&existing))
    }

    /// Write the rendered content, creating parent directories as needed
    pub fn write(&self) -> io::Result<()> {
        write_file(&self.path, &self.render())
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Rules that determine how a file is rendered
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub header: Option<String>,
}
