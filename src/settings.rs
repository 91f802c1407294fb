use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::classifier::{ClassifierConfig, SourceClassifier};
use crate::merging::SampleMerger;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// On-disk engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub classifier: ClassifierConfig,
}

impl EngineSettings {
    /// Read settings from `path`. A missing file yields defaults, as does a
    /// file that is not valid settings JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log_info!("no engine settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine settings from {}", path.display()))?;

        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                log_warn!(
                    "ignoring malformed engine settings at {}: {err}",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write engine settings to {}", path.display()))
    }

    pub fn classifier(&self) -> SourceClassifier {
        SourceClassifier::new(self.classifier.clone())
    }

    pub fn merger(&self) -> SampleMerger {
        SampleMerger::new(self.classifier())
    }
}
