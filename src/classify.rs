//! Change classification
//!
//! Maps the source-tree paths that changed since the last deployment to the
//! deployable units that need redeployment, and to the named targets inside
//! each unit. Pure function over its input: every call builds and returns a
//! fresh `ChangeSet`, so independent runs cannot observe each other.

use crate::models::{ChangeSet, UpdateAction};

/// How a rule derives a target name from a matching path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetRule {
    /// The path segment immediately after the prefix.
    ///
    /// Used for units laid out one-directory-per-target (functions,
    /// services, custom resources): every file under the same directory
    /// collapses to that directory's name.
    Segment,
    /// The final path segment.
    ///
    /// Used for flat collections of individual files (shared templates).
    FileName,
    /// The unit deploys as a whole; matching paths record no target.
    WholeUnit,
}

struct ClassifyRule {
    action: UpdateAction,
    prefix: &'static str,
    target: TargetRule,
}

/// Match rules in priority order, most specific prefix first. The
/// custom-resources tree lives under the generic resources prefix and must
/// be tested before it, or its paths would be misfiled as template changes.
const RULES: [ClassifyRule; 5] = [
    ClassifyRule {
        action: UpdateAction::CustomResources,
        prefix: "resources/custom-resources/",
        target: TargetRule::Segment,
    },
    ClassifyRule {
        action: UpdateAction::Resources,
        prefix: "resources/",
        target: TargetRule::FileName,
    },
    ClassifyRule {
        action: UpdateAction::Client,
        prefix: "client/",
        target: TargetRule::WholeUnit,
    },
    ClassifyRule {
        action: UpdateAction::Functions,
        prefix: "functions/",
        target: TargetRule::Segment,
    },
    ClassifyRule {
        action: UpdateAction::Services,
        prefix: "services/",
        target: TargetRule::Segment,
    },
];

/// Classify a diff of changed paths into the update actions it requires.
///
/// Paths are repository-relative and "/"-delimited. Each path matches at
/// most one rule (first match in priority order wins); paths matching no
/// rule are ignored. A matching path that is too short to carry a target
/// segment still marks its category as touched.
pub fn classify<I, S>(paths: I) -> ChangeSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut changes = ChangeSet::new();

    for path in paths {
        let path = path.as_ref();
        let Some(rule) = RULES.iter().find(|rule| path.starts_with(rule.prefix)) else {
            continue;
        };

        let remainder = &path[rule.prefix.len()..];
        match rule.target {
            TargetRule::Segment => match remainder.split('/').find(|s| !s.is_empty()) {
                Some(segment) => changes.add_target(rule.action, segment),
                None => changes.mark(rule.action),
            },
            TargetRule::FileName => match remainder.rsplit('/').find(|s| !s.is_empty()) {
                Some(file) => changes.add_target(rule.action, file),
                None => changes.mark(rule.action),
            },
            TargetRule::WholeUnit => changes.mark(rule.action),
        }
    }

    changes
}
