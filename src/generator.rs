//! Topic-driven option lists from an external text generator.
//!
//! The network call belongs to the host. This module builds the request prompt,
//! parses the `{"options": [...]}` reply, and substitutes a fixed default list
//! on any failure, so the generator can never block or break a spin.

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::types::WeightedOption;

/// Returned whenever generation fails.
pub const DEFAULT_GENERATED_LABELS: [&str; 6] = [
    "Option 1", "Option 2", "Option 3", "Option 4", "Option 5", "Option 6",
];

/// Labels beyond this are dropped.
pub const MAX_GENERATED_LABELS: usize = 8;
pub const MIN_GENERATED_LABELS: usize = 2;

/// Something that turns a topic into wheel labels.
pub trait OptionGenerator {
    fn generate(&self, topic: &str) -> Result<Vec<String>, GeneratorError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct GeneratorReply {
    #[serde(default)]
    options: Vec<String>,
}

pub fn build_prompt(topic: &str) -> String {
    format!(
        "Generate 6 to 8 creative and distinct options for a decision wheel based on this topic: \"{}\". Make them concise (1-3 words).",
        topic.trim()
    )
}

/// JSON schema the generator is asked to answer with.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "options": {
                "type": "array",
                "items": { "type": "string" },
                "description": "A list of 6-8 wheel segment options"
            }
        },
        "required": ["options"]
    })
}

/// Parse a generator reply. Blank labels are dropped and at most
/// [`MAX_GENERATED_LABELS`] are kept.
pub fn parse_response(text: &str) -> Result<Vec<String>, GeneratorError> {
    let text = text.trim();
    let reply: GeneratorReply = if text.is_empty() {
        GeneratorReply { options: Vec::new() }
    } else {
        serde_json::from_str(text)?
    };

    let labels: Vec<String> = reply
        .options
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .take(MAX_GENERATED_LABELS)
        .collect();

    if labels.len() < MIN_GENERATED_LABELS {
        return Err(GeneratorError::TooFewLabels(labels.len()));
    }
    Ok(labels)
}

pub fn default_labels() -> Vec<String> {
    DEFAULT_GENERATED_LABELS.iter().map(|l| l.to_string()).collect()
}

/// Unwrap a generation outcome, falling back to [`DEFAULT_GENERATED_LABELS`].
pub fn labels_or_default(outcome: Result<Vec<String>, GeneratorError>) -> Vec<String> {
    match outcome {
        Ok(labels) => labels,
        Err(e) => {
            tracing::warn!(error = %e, "option generation failed, using defaults");
            default_labels()
        }
    }
}

pub fn generate_labels<G: OptionGenerator + ?Sized>(generator: &G, topic: &str) -> Vec<String> {
    labels_or_default(generator.generate(topic))
}

/// Equal-weight options for generated labels, colors cycled from `palette`.
pub fn options_from_labels(labels: &[String], palette: &[String]) -> Vec<WeightedOption> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let color = if palette.is_empty() {
                crate::render::LIGHT_TEXT.to_string()
            } else {
                palette[i % palette.len()].clone()
            };
            WeightedOption::new((i + 1).to_string(), label.clone(), color, 1.0)
        })
        .collect()
}
