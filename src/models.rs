//! Core data models for restack
//!
//! Defines the fundamental data structures used throughout restack:
//! - `UpdateAction`: the deployable-unit categories of the application
//! - `ChangeSet`: which categories (and named targets) a diff touched
//! - `TemplateParameter`: a parameter declared by an infrastructure template
//! - `ParameterMap`: an order-preserving name → value map
//! - `Environment`: the deployment environment being updated

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Deployable-unit category affected by a source change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateAction {
    /// The web client, deployed as a whole
    Client,
    /// Serverless functions, one directory per function
    Functions,
    /// Backend services, one directory per service
    Services,
    /// Shared infrastructure templates, one file per stack
    Resources,
    /// Custom infrastructure resources, one directory per resource
    CustomResources,
}

impl UpdateAction {
    /// All categories, in the order update plans list them
    pub const ALL: [UpdateAction; 5] = [
        UpdateAction::Client,
        UpdateAction::Functions,
        UpdateAction::Services,
        UpdateAction::Resources,
        UpdateAction::CustomResources,
    ];

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            UpdateAction::Client => "client",
            UpdateAction::Functions => "functions",
            UpdateAction::Services => "services",
            UpdateAction::Resources => "resources",
            UpdateAction::CustomResources => "custom resources",
        }
    }
}

impl std::fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of classifying one diff: the categories a change touched, each with
/// the set of named targets affected inside it.
///
/// A category can be present with an empty target set (the client deploys as
/// a whole unit and has no named sub-targets). Values are built fresh by each
/// classification call; nothing is shared between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    entries: BTreeMap<UpdateAction, BTreeSet<String>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a category as touched, without recording a target
    pub fn mark(&mut self, action: UpdateAction) {
        self.entries.entry(action).or_default();
    }

    /// Mark a category as touched and record a named target for it.
    ///
    /// Re-adding an existing target is a no-op (set semantics).
    pub fn add_target(&mut self, action: UpdateAction, target: impl Into<String>) {
        self.entries.entry(action).or_default().insert(target.into());
    }

    /// Whether a category was touched by the classified diff
    pub fn contains(&self, action: UpdateAction) -> bool {
        self.entries.contains_key(&action)
    }

    /// Targets recorded for a category (`None` if the category was not touched)
    pub fn targets(&self, action: UpdateAction) -> Option<&BTreeSet<String>> {
        self.entries.get(&action)
    }

    /// Touched categories with their target sets
    pub fn iter(&self) -> impl Iterator<Item = (UpdateAction, &BTreeSet<String>)> + '_ {
        self.entries.iter().map(|(action, targets)| (*action, targets))
    }

    /// Touched categories only
    pub fn actions(&self) -> impl Iterator<Item = UpdateAction> + '_ {
        self.entries.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of touched categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A parameter declared by an infrastructure template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParameter {
    /// Parameter name, unique within its template
    pub name: String,
    /// Declared default value, if the template provides one
    pub default: Option<String>,
}

impl TemplateParameter {
    /// Declare a parameter with no default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// Declare a parameter with a default value
    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

/// Name → value map that preserves insertion order.
///
/// Template parameters keep their declaration order all the way into the
/// deployed stack, so a plain sorted map is not enough here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<(String, String)>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing in place if the name is already present
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ParameterMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Streaming serializers emit entries in iteration order, so the
        // declaration order survives into JSON output.
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The deployment environment an update run operates on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name (e.g. "dev", "prod")
    #[serde(default = "default_environment_name")]
    pub name: String,

    /// Cloud account the environment's stacks live in
    #[serde(default)]
    pub account_id: Option<String>,

    /// Region the environment's stacks live in
    #[serde(default)]
    pub region: Option<String>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_id: None,
            region: None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(default_environment_name())
    }
}

fn default_environment_name() -> String {
    "default".to_string()
}
