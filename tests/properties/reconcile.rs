//! Property tests for parameter reconciliation.

use std::collections::BTreeMap;

use proptest::prelude::*;

use restack::{reconcile, RestackResult, TemplateParameter, ValuePrompt};

/// How a generated parameter is meant to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Known,
    Defaulted,
    Prompted,
}

/// Prompt that answers every question deterministically and records it
#[derive(Default)]
struct EchoPrompt {
    asked: Vec<String>,
}

impl ValuePrompt for EchoPrompt {
    fn value_for(&mut self, parameter: &str) -> RestackResult<String> {
        self.asked.push(parameter.to_string());
        Ok(format!("typed-{}", parameter))
    }
}

/// Unique parameter names, each tagged with its intended resolution class
fn parameter_specs() -> impl Strategy<Value = Vec<(String, Resolution)>> {
    let name = proptest::string::string_regex("[A-Za-z][A-Za-z0-9]{0,10}").unwrap();
    let resolution = prop_oneof![
        Just(Resolution::Known),
        Just(Resolution::Defaulted),
        Just(Resolution::Prompted),
    ];
    proptest::collection::vec((name, resolution), 0..10).prop_map(|mut specs| {
        let mut seen = std::collections::BTreeSet::new();
        specs.retain(|(name, _)| seen.insert(name.clone()));
        specs
    })
}

fn build_inputs(
    specs: &[(String, Resolution)],
) -> (Vec<TemplateParameter>, BTreeMap<String, String>) {
    let mut parameters = Vec::new();
    let mut known = BTreeMap::new();

    for (name, resolution) in specs {
        match resolution {
            Resolution::Known => {
                parameters.push(TemplateParameter::new(name.clone()));
                known.insert(name.clone(), format!("deployed-{}", name));
            }
            Resolution::Defaulted => {
                parameters.push(TemplateParameter::with_default(
                    name.clone(),
                    format!("default-{}", name),
                ));
            }
            Resolution::Prompted => {
                parameters.push(TemplateParameter::new(name.clone()));
            }
        }
    }

    (parameters, known)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The output is total and in declaration order, regardless of
    /// how each parameter resolves.
    #[test]
    fn property_output_is_total_and_ordered(
        specs in parameter_specs()
    ) {
        let (parameters, known) = build_inputs(&specs);
        let mut prompt = EchoPrompt::default();

        let resolved = reconcile(&parameters, &known, &mut prompt).unwrap();

        prop_assert_eq!(resolved.len(), specs.len());
        let names: Vec<&str> = resolved.iter().map(|(n, _)| n).collect();
        let declared: Vec<&str> = specs.iter().map(|(n, _)| n.as_str()).collect();
        prop_assert_eq!(names, declared);
    }

    /// PROPERTY: The prompt is asked exactly for the parameters with neither
    /// a known value nor a default, in declaration order.
    #[test]
    fn property_prompt_is_asked_exactly_when_needed(
        specs in parameter_specs()
    ) {
        let (parameters, known) = build_inputs(&specs);
        let mut prompt = EchoPrompt::default();

        reconcile(&parameters, &known, &mut prompt).unwrap();

        let expected: Vec<&str> = specs
            .iter()
            .filter(|(_, r)| *r == Resolution::Prompted)
            .map(|(n, _)| n.as_str())
            .collect();
        prop_assert_eq!(prompt.asked.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    /// PROPERTY: Each value follows the precedence rule for its class.
    #[test]
    fn property_precedence_per_parameter(
        specs in parameter_specs()
    ) {
        let (parameters, known) = build_inputs(&specs);
        let mut prompt = EchoPrompt::default();

        let resolved = reconcile(&parameters, &known, &mut prompt).unwrap();

        for (name, resolution) in &specs {
            let value = resolved.get(name).unwrap();
            let expected = match resolution {
                Resolution::Known => format!("deployed-{}", name),
                Resolution::Defaulted => format!("default-{}", name),
                Resolution::Prompted => format!("typed-{}", name),
            };
            prop_assert_eq!(value, expected);
        }
    }
}
