//! Execution context for webtangle commands.

use std::path::{Path, PathBuf};

use crate::config::{Config, Syntax};
use crate::errors::Result;
use crate::model::FragmentStore;
use crate::readers::read_document_file;

/// Context for webtangle operations.
///
/// Holds the configuration, the syntax compiled from its markers, and the
/// directory relative paths are resolved against.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Document syntax compiled from `config.markers`.
    pub syntax: Syntax,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Result<Self> {
        let syntax = Syntax::new(&config.markers)?;
        Ok(Self {
            config,
            syntax,
            base_dir,
        })
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Result<Self> {
        Self::new(Config::default(), base_dir)
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Reads and parses a document with this context's syntax.
    pub fn load_document(&self, path: &Path) -> Result<FragmentStore> {
        let path = self.resolve_path(path);
        tracing::debug!("Reading {}", path.display());
        read_document_file(&path, &self.syntax)
    }
}
