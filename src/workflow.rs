//! Update workflow
//!
//! Ties the decision pieces together: classify the diff, load the templates
//! behind changed stacks, reconcile their parameters against the deployed
//! snapshot, and lower everything into an `UpdatePlan` a deployer can
//! execute. Infrastructure steps come before code steps so stacks are
//! current by the time functions and services redeploy onto them.

use std::path::PathBuf;

use crate::classify::classify;
use crate::config::LayoutConfig;
use crate::deploy::{StackDeployer, UpdatePlan, UpdateStep};
use crate::error::RestackResult;
use crate::models::{Environment, UpdateAction};
use crate::params::reconcile;
use crate::prompt::ValuePrompt;
use crate::snapshot::Snapshot;
use crate::template::Template;

/// Category order when lowering a change set into plan steps.
///
/// Custom resources feed the shared templates, which the functions and
/// services in turn deploy onto; the client goes out last.
const PLAN_ORDER: [UpdateAction; 5] = [
    UpdateAction::CustomResources,
    UpdateAction::Resources,
    UpdateAction::Functions,
    UpdateAction::Services,
    UpdateAction::Client,
];

/// One update run against a deployment environment
pub struct UpdateWorkflow<'a> {
    source_root: PathBuf,
    environment: Environment,
    layout: LayoutConfig,
    prompt: &'a mut dyn ValuePrompt,
}

impl<'a> UpdateWorkflow<'a> {
    pub fn new(
        source_root: impl Into<PathBuf>,
        environment: Environment,
        layout: LayoutConfig,
        prompt: &'a mut dyn ValuePrompt,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            environment,
            layout,
            prompt,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Decide what the changed paths require.
    ///
    /// Stack updates carry fully reconciled parameters, so this may prompt:
    /// once per parameter that is neither in the snapshot nor defaulted by
    /// its template, in template declaration order. Targets within a
    /// category are handled in name order, which keeps the whole prompt
    /// sequence deterministic.
    pub fn plan<S: AsRef<str>>(
        &mut self,
        changed_paths: &[S],
        snapshot: &Snapshot,
    ) -> RestackResult<UpdatePlan> {
        let changes = classify(changed_paths);
        let mut plan = UpdatePlan::new();

        for action in PLAN_ORDER {
            let Some(targets) = changes.targets(action) else {
                continue;
            };

            match action {
                UpdateAction::Client => plan.push(UpdateStep::PublishClient),
                UpdateAction::Functions => {
                    for name in targets {
                        plan.push(UpdateStep::RedeployFunction { name: name.clone() });
                    }
                }
                UpdateAction::Services => {
                    for name in targets {
                        plan.push(UpdateStep::RedeployService { name: name.clone() });
                    }
                }
                UpdateAction::CustomResources => {
                    for name in targets {
                        plan.push(UpdateStep::RebuildCustomResource { name: name.clone() });
                    }
                }
                UpdateAction::Resources => {
                    for name in targets {
                        let template_path = self
                            .source_root
                            .join(&self.layout.resources_dir)
                            .join(name);
                        let template = Template::load(&template_path)?;
                        let known = snapshot.known_values(name);
                        let parameters = reconcile(template.parameters(), &known, self.prompt)?;
                        plan.push(UpdateStep::UpdateStack {
                            template: name.clone(),
                            parameters,
                        });
                    }
                }
            }
        }

        Ok(plan)
    }

    /// Apply every step of a plan, in order, failing fast
    pub fn execute(
        &self,
        plan: &UpdatePlan,
        deployer: &mut dyn StackDeployer,
    ) -> RestackResult<()> {
        for step in plan.steps() {
            deployer.apply(&self.environment, step)?;
        }
        Ok(())
    }
}
