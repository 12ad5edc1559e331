//! Update plans and the deployer seam
//!
//! An `UpdatePlan` is the ordered list of work an update run decided on.
//! Executing a step against the remote side goes through the `StackDeployer`
//! trait; this crate ships a dry-run deployer and one that delegates to
//! operator-configured shell commands. The actual cloud API calls live
//! behind those commands, outside this crate.

use std::path::PathBuf;
use std::process::Command;

use serde::Serialize;

use crate::config::CommandsConfig;
use crate::error::{RestackError, RestackResult};
use crate::models::{Environment, ParameterMap};

/// A single unit of work in an update plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum UpdateStep {
    /// Publish the web client as a whole
    PublishClient,
    /// Redeploy one serverless function by directory name
    RedeployFunction { name: String },
    /// Redeploy one backend service by directory name
    RedeployService { name: String },
    /// Rebuild one custom infrastructure resource by directory name
    RebuildCustomResource { name: String },
    /// Update the stack behind one template, with fully reconciled parameters
    UpdateStack {
        template: String,
        parameters: ParameterMap,
    },
}

impl std::fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateStep::PublishClient => write!(f, "publish client"),
            UpdateStep::RedeployFunction { name } => write!(f, "redeploy function '{}'", name),
            UpdateStep::RedeployService { name } => write!(f, "redeploy service '{}'", name),
            UpdateStep::RebuildCustomResource { name } => {
                write!(f, "rebuild custom resource '{}'", name)
            }
            UpdateStep::UpdateStack {
                template,
                parameters,
            } => write!(
                f,
                "update stack from '{}' ({} parameters)",
                template,
                parameters.len()
            ),
        }
    }
}

/// Ordered list of steps an update run decided on
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePlan {
    steps: Vec<UpdateStep>,
}

impl UpdatePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: UpdateStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[UpdateStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// The stack-update steps of the plan (template + reconciled parameters)
    pub fn stack_updates(&self) -> impl Iterator<Item = (&str, &ParameterMap)> + '_ {
        self.steps.iter().filter_map(|step| match step {
            UpdateStep::UpdateStack {
                template,
                parameters,
            } => Some((template.as_str(), parameters)),
            _ => None,
        })
    }
}

/// Applies update steps against the deployed environment.
///
/// The outcome of the remote operation is not interpreted here; a deployer
/// reports success or failure and the caller decides whether to continue.
pub trait StackDeployer {
    fn apply(&mut self, environment: &Environment, step: &UpdateStep) -> RestackResult<()>;
}

/// Deployer that only narrates what would happen
#[derive(Debug, Default)]
pub struct DryRunDeployer {
    applied: Vec<UpdateStep>,
}

impl DryRunDeployer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps this deployer was asked to apply, in order
    pub fn applied(&self) -> &[UpdateStep] {
        &self.applied
    }
}

impl StackDeployer for DryRunDeployer {
    fn apply(&mut self, environment: &Environment, step: &UpdateStep) -> RestackResult<()> {
        println!("[{}] would {}", environment.name, step);
        self.applied.push(step.clone());
        Ok(())
    }
}

/// Deployer that runs the operator-configured command for each step kind.
///
/// The command inherits the step's context through `RESTACK_*` environment
/// variables; stack parameters are passed as a JSON object in
/// `RESTACK_PARAMETERS`. Steps with no configured command are skipped with
/// a notice rather than failing the run.
pub struct CommandDeployer {
    commands: CommandsConfig,
    working_dir: PathBuf,
}

impl CommandDeployer {
    pub fn new(commands: CommandsConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            commands,
            working_dir: working_dir.into(),
        }
    }

    fn command_for(&self, step: &UpdateStep) -> Option<&str> {
        match step {
            UpdateStep::PublishClient => self.commands.client.as_deref(),
            UpdateStep::RedeployFunction { .. } => self.commands.function.as_deref(),
            UpdateStep::RedeployService { .. } => self.commands.service.as_deref(),
            UpdateStep::RebuildCustomResource { .. } => self.commands.custom_resource.as_deref(),
            UpdateStep::UpdateStack { .. } => self.commands.stack.as_deref(),
        }
    }
}

impl StackDeployer for CommandDeployer {
    fn apply(&mut self, environment: &Environment, step: &UpdateStep) -> RestackResult<()> {
        let Some(command_line) = self.command_for(step) else {
            eprintln!("no command configured for '{}', skipping", step);
            return Ok(());
        };

        let mut cmd = shell_command(command_line);
        cmd.current_dir(&self.working_dir)
            .env("RESTACK_ENVIRONMENT", &environment.name);
        if let Some(account_id) = &environment.account_id {
            cmd.env("RESTACK_ACCOUNT_ID", account_id);
        }
        if let Some(region) = &environment.region {
            cmd.env("RESTACK_REGION", region);
        }

        match step {
            UpdateStep::RedeployFunction { name }
            | UpdateStep::RedeployService { name }
            | UpdateStep::RebuildCustomResource { name } => {
                cmd.env("RESTACK_TARGET", name);
            }
            UpdateStep::UpdateStack {
                template,
                parameters,
            } => {
                cmd.env("RESTACK_TEMPLATE", template);
                cmd.env("RESTACK_PARAMETERS", serde_json::to_string(parameters)?);
            }
            UpdateStep::PublishClient => {}
        }

        let status = cmd.status()?;
        if !status.success() {
            return Err(RestackError::Io(std::io::Error::other(format!(
                "command for '{}' failed with exit code: {:?}",
                step,
                status.code()
            ))));
        }

        Ok(())
    }
}

fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command_line);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}
