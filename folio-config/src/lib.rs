//! Shared configuration loader for the folio toolchain.
//!
//! `defaults/folio.default.toml` is embedded into every binary so that the documented defaults
//! and runtime behavior stay in sync. Applications layer user-specific files on top of those
//! defaults via [`Loader`] before deserializing into [`FolioConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use folio_babel::batch::Job;
use folio_babel::formats::latex::LatexOptions;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/folio.default.toml");

/// Top-level configuration consumed by folio applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FolioConfig {
    pub latex: LatexConfig,
    pub normalize: NormalizeConfig,
    pub compile: CompileConfig,
}

impl FolioConfig {
    /// Batch job that normalizes manuscripts with the configured output naming.
    pub fn normalize_job(&self) -> Job {
        Job::Normalize {
            suffix: self.normalize.output_suffix.clone(),
        }
    }

    /// Batch job that compiles manuscripts with the configured typesetting options.
    pub fn compile_job(&self) -> Job {
        Job::Compile {
            options: LatexOptions::from(&self.latex),
            extension: self.compile.output_extension.clone(),
        }
    }
}

/// Mirrors the knobs exposed by the LaTeX emitter.
#[derive(Debug, Clone, Deserialize)]
pub struct LatexConfig {
    pub main_font: String,
    #[serde(default)]
    pub fallback_font: Option<String>,
    pub heading_font: String,
    pub font_size: u32,
    pub line_spread: f64,
    pub paragraph_indent: String,
    pub toc_depth: i32,
    pub linebreak_locale: String,
}

impl From<&LatexConfig> for LatexOptions {
    fn from(config: &LatexConfig) -> Self {
        LatexOptions {
            main_font: config.main_font.clone(),
            fallback_font: config.fallback_font.clone(),
            heading_font: config.heading_font.clone(),
            font_size: config.font_size,
            line_spread: config.line_spread,
            paragraph_indent: config.paragraph_indent.clone(),
            toc_depth: config.toc_depth,
            linebreak_locale: config.linebreak_locale.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    pub output_suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    pub output_extension: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (command-line flags end up here).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FolioConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FolioConfig, ConfigError> {
    Loader::new().build()
}
