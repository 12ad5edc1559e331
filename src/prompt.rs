//! Interactive parameter input
//!
//! Provides the `ValuePrompt` trait for supplying values of template
//! parameters that cannot be resolved any other way. Use `ConsolePrompt` in
//! production (stdin/stderr) or `ScriptedPrompt` for tests and non-TTY runs.

use std::io::{self, BufRead, Write};

use crate::error::{RestackError, RestackResult};

/// Capability to obtain a parameter value from the operator.
///
/// Reconciliation calls this once per unresolvable parameter, in template
/// declaration order, and blocks until a value is available. Failure to
/// obtain a value must surface as an error, never a silent default.
pub trait ValuePrompt {
    /// Ask for the value of a single template parameter
    fn value_for(&mut self, parameter: &str) -> RestackResult<String>;
}

/// Interactive prompt reading from stdin, prompting on stderr
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ValuePrompt for ConsolePrompt {
    fn value_for(&mut self, parameter: &str) -> RestackResult<String> {
        eprint!("Enter a value for parameter '{}': ", parameter);
        io::stderr().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(RestackError::PromptClosed {
                parameter: parameter.to_string(),
            });
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Scripted prompt that replays a fixed sequence of responses.
///
/// Running out of responses behaves like a closed input stream. The names
/// that were asked for are recorded for inspection.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    responses: std::collections::VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Parameter names this prompt was asked for, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ValuePrompt for ScriptedPrompt {
    fn value_for(&mut self, parameter: &str) -> RestackResult<String> {
        self.asked.push(parameter.to_string());
        self.responses
            .pop_front()
            .ok_or_else(|| RestackError::PromptClosed {
                parameter: parameter.to_string(),
            })
    }
}
