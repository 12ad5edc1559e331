//! Deployed-parameter snapshot
//!
//! JSON state file recording, per template, the parameter values of the last
//! successful deployment. The snapshot is the updater's known-value source:
//! a value found here needs no operator input on the next update. Declared
//! template defaults are never folded into the snapshot; default resolution
//! happens in one place only, during reconciliation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RestackError, RestackResult};
use crate::models::ParameterMap;

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk record of the last deployment's parameter values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,

    /// When the snapshot was last written
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,

    /// Parameter values per template file name
    #[serde(default)]
    stacks: BTreeMap<String, BTreeMap<String, String>>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            recorded_at: None,
            stacks: BTreeMap::new(),
        }
    }
}

impl Snapshot {
    /// Load a snapshot file. A missing file is an empty snapshot (first
    /// deployment); an unparseable one is an error.
    pub fn load(path: &Path) -> RestackResult<Snapshot> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Snapshot::default())
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| RestackError::MalformedSnapshot {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write the snapshot, creating parent directories as needed
    pub fn save(&self, path: &Path) -> RestackResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Known parameter values for one template (empty if never deployed)
    pub fn known_values(&self, template: &str) -> BTreeMap<String, String> {
        self.stacks.get(template).cloned().unwrap_or_default()
    }

    /// Record the parameter values a stack was just deployed with
    pub fn record(&mut self, template: &str, parameters: &ParameterMap) {
        let values = parameters
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        self.stacks.insert(template.to_string(), values);
        self.recorded_at = Some(Utc::now());
    }

    /// Templates with recorded values
    pub fn templates(&self) -> impl Iterator<Item = &str> + '_ {
        self.stacks.keys().map(String::as_str)
    }
}
