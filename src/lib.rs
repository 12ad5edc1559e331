//! restack - installer/updater for multi-component cloud applications
//!
//! restack keeps a deployed application (web client, serverless functions,
//! backend services, shared infrastructure templates, custom resources) in
//! sync with its source tree: given the paths that changed since the last
//! deployment it decides which units need redeployment, reconciles stack
//! parameters against the values already deployed, and hands the resulting
//! plan to a deployer.

pub mod classify;
pub mod config;
pub mod deploy;
pub mod error;
pub mod models;
pub mod params;
pub mod prompt;
pub mod snapshot;
pub mod template;
pub mod workflow;

// Re-exports for convenience
pub use classify::classify;
pub use config::{CommandsConfig, Config, ConfigWarning, LayoutConfig};
pub use deploy::{CommandDeployer, DryRunDeployer, StackDeployer, UpdatePlan, UpdateStep};
pub use error::{RestackError, RestackResult};
pub use models::{ChangeSet, Environment, ParameterMap, TemplateParameter, UpdateAction};
pub use params::reconcile;
pub use prompt::{ConsolePrompt, ScriptedPrompt, ValuePrompt};
pub use snapshot::Snapshot;
pub use template::Template;
pub use workflow::UpdateWorkflow;
