use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::LoadError;

/// One input file. `path` is kept exactly as configured and is the unit's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: LoadError,
}

/// Everything read for one run, in configured order.
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    /// Every configured path, loaded or not. These are the graph vertices.
    pub order: Vec<PathBuf>,
    pub units: Vec<SourceUnit>,
    pub missing: Vec<PathBuf>,
    pub failures: Vec<LoadFailure>,
}

impl LoadedCorpus {
    /// Build a corpus from in-memory units; vertex order follows the slice.
    pub fn from_units(units: Vec<SourceUnit>) -> Self {
        Self {
            order: units.iter().map(|unit| unit.path.clone()).collect(),
            units,
            missing: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn record_failure(&mut self, path: &Path, error: LoadError) {
        warn!(path = %path.display(), %error, "failed to load source file");
        self.failures.push(LoadFailure {
            path: path.to_path_buf(),
            error,
        });
    }
}

pub struct SourceLoader {
    root: PathBuf,
}

impl SourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn load(&self, files: &[PathBuf]) -> LoadedCorpus {
        let mut corpus = LoadedCorpus {
            order: files.to_vec(),
            units: Vec::with_capacity(files.len()),
            ..LoadedCorpus::default()
        };

        for path in files {
            let full_path = self.root.join(path);
            // Only NotFound counts as missing; other metadata errors are failures.
            let loaded = match full_path.try_exists() {
                Ok(false) => {
                    debug!(path = %path.display(), "skipping missing file");
                    corpus.missing.push(path.clone());
                    continue;
                }
                Ok(true) => read_source(&full_path),
                Err(error) => Err(LoadError::from(error)),
            };

            match loaded {
                Ok(text) => corpus.units.push(SourceUnit::new(path.clone(), text)),
                Err(error) => corpus.record_failure(path, error),
            }
        }

        corpus
    }
}

/// Read a file as strict UTF-8.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|err| LoadError::Decode {
        offset: err.utf8_error().valid_up_to(),
    })
}
