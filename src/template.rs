//! Infrastructure template loading
//!
//! Extracts the `Parameters:` section of a YAML infrastructure template,
//! preserving declaration order. Only the parameter declarations matter to
//! the updater; the rest of the template passes through to the stack
//! deployer untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{RestackError, RestackResult};
use crate::models::TemplateParameter;

/// Key of the parameter section in a template document
const PARAMETERS_KEY: &str = "Parameters";

/// Key of a parameter's declared default inside its declaration body
const DEFAULT_KEY: &str = "Default";

/// A loaded infrastructure template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    path: PathBuf,
    parameters: Vec<TemplateParameter>,
}

impl Template {
    /// Load a template file and extract its parameter declarations
    pub fn load(path: &Path) -> RestackResult<Template> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse template content. `path` is used for error reporting only.
    pub fn parse(content: &str, path: &Path) -> RestackResult<Template> {
        let document: Value =
            serde_yaml::from_str(content).map_err(|e| RestackError::MalformedTemplate {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let parameters = extract_parameters(&document, path)?;
        Ok(Template {
            path: path.to_path_buf(),
            parameters,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parameter declarations, in the order the template declares them
    pub fn parameters(&self) -> &[TemplateParameter] {
        &self.parameters
    }
}

/// Walk the `Parameters:` mapping in document order.
///
/// A template without a parameter section declares no parameters; that is
/// not an error. Anything structurally wrong inside the section is.
fn extract_parameters(document: &Value, path: &Path) -> RestackResult<Vec<TemplateParameter>> {
    let Some(section) = document.get(PARAMETERS_KEY) else {
        return Ok(Vec::new());
    };

    let mapping = section
        .as_mapping()
        .ok_or_else(|| RestackError::MalformedTemplate {
            file: path.to_path_buf(),
            message: format!("{} is not a mapping", PARAMETERS_KEY),
        })?;

    let mut parameters = Vec::with_capacity(mapping.len());
    for (name, declaration) in mapping {
        let name = name.as_str().ok_or_else(|| RestackError::MalformedTemplate {
            file: path.to_path_buf(),
            message: "parameter name is not a string".to_string(),
        })?;

        let default = parameter_default(name, declaration, path)?;
        parameters.push(TemplateParameter {
            name: name.to_string(),
            default,
        });
    }

    Ok(parameters)
}

fn parameter_default(
    name: &str,
    declaration: &Value,
    path: &Path,
) -> RestackResult<Option<String>> {
    let body = match declaration {
        Value::Mapping(body) => body,
        Value::Null => return Ok(None),
        _ => {
            return Err(RestackError::MalformedTemplate {
                file: path.to_path_buf(),
                message: format!("declaration of parameter '{}' is not a mapping", name),
            })
        }
    };

    match body.get(DEFAULT_KEY) {
        None | Some(Value::Null) => Ok(None),
        // Numeric and boolean defaults are legal in templates; parameter
        // values are opaque strings from here on.
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(RestackError::MalformedTemplate {
            file: path.to_path_buf(),
            message: format!("default of parameter '{}' is not a scalar", name),
        }),
    }
}
