use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::factory::{SeedCache, StreamFactory};
use crate::params::ParameterSet;

/// Generator configuration document.
///
/// ```json
/// { "parameter_set": "l31_k6", "seed": 12345 }
/// ```
///
/// `parameter_set` falls back to the build default when omitted.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub parameter_set: ParameterSet,
    pub seed: u32,
}

impl GeneratorConfig {
    /// Load a configuration JSON document from disk.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open generator config {:?}", path))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Deserialize a configuration document from an arbitrary reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("invalid generator config json")
    }

    /// A factory for the configured parameter set with the configured seed
    /// already cached, so creations with any other seed warn.
    pub fn factory(&self) -> StreamFactory {
        StreamFactory::with_seed_cache(self.parameter_set, SeedCache::preset(self.seed))
    }
}
