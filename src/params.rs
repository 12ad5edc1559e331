//! Parameter reconciliation
//!
//! Merges a template's declared parameters with the values already known
//! from the running deployment, asking the operator only for parameters that
//! have neither. A stack update with even one unresolved parameter is
//! rejected wholesale by the remote side, so the output is total: exactly
//! one value per declared parameter, in declaration order.

use std::collections::BTreeMap;

use crate::error::RestackResult;
use crate::models::{ParameterMap, TemplateParameter};
use crate::prompt::ValuePrompt;

/// Resolve a final value for every declared parameter.
///
/// Precedence per parameter: a known value is used verbatim; otherwise the
/// template's declared default; otherwise the prompt is asked. Parameters
/// are resolved in declaration order, so any prompting happens in the order
/// the operator sees in the template. A prompt failure aborts the whole
/// reconciliation; no partial map is returned.
pub fn reconcile(
    parameters: &[TemplateParameter],
    known: &BTreeMap<String, String>,
    prompt: &mut dyn ValuePrompt,
) -> RestackResult<ParameterMap> {
    let mut resolved = ParameterMap::new();

    for parameter in parameters {
        if let Some(value) = known.get(&parameter.name) {
            resolved.insert(&parameter.name, value);
        } else if let Some(default) = &parameter.default {
            resolved.insert(&parameter.name, default);
        } else {
            let value = prompt.value_for(&parameter.name)?;
            resolved.insert(&parameter.name, value);
        }
    }

    Ok(resolved)
}
