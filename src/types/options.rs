//! Generation options for completion requests

use serde::{Deserialize, Serialize};

/// Generation controls sent to the completion endpoint.
///
/// All fields are optional; [`CompletionClient`](crate::CompletionClient)
/// merges caller overrides over [`GenerateOptions::defaults`] before each
/// call. Serializes to the endpoint's `options` bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Maximum output tokens (`num_predict` on the wire).
    #[serde(rename = "num_predict", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f64>,
}

impl GenerateOptions {
    /// The default parameter set applied when the caller overrides nothing.
    pub fn defaults() -> Self {
        Self {
            temperature: Some(0.7),
            top_p: Some(0.9),
            top_k: Some(40),
            max_tokens: Some(2000),
            repeat_penalty: Some(1.1),
        }
    }

    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn top_p(mut self, p: f64) -> Self {
        self.top_p = Some(p);
        self
    }

    pub fn top_k(mut self, k: u32) -> Self {
        self.top_k = Some(k);
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn repeat_penalty(mut self, penalty: f64) -> Self {
        self.repeat_penalty = Some(penalty);
        self
    }

    /// Merge `self` over `base`: any field set here wins, anything unset
    /// falls through to `base`.
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            temperature: self.temperature.or(base.temperature),
            top_p: self.top_p.or(base.top_p),
            top_k: self.top_k.or(base.top_k),
            max_tokens: self.max_tokens.or(base.max_tokens),
            repeat_penalty: self.repeat_penalty.or(base.repeat_penalty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_overrides_and_fills_defaults() {
        let merged = GenerateOptions::default()
            .temperature(0.1)
            .merged_over(&GenerateOptions::defaults());
        assert_eq!(merged.temperature, Some(0.1));
        assert_eq!(merged.top_p, Some(0.9));
        assert_eq!(merged.top_k, Some(40));
        assert_eq!(merged.max_tokens, Some(2000));
        assert_eq!(merged.repeat_penalty, Some(1.1));
    }

    #[test]
    fn max_tokens_serializes_as_num_predict() {
        let json = serde_json::to_value(GenerateOptions::default().max_tokens(128)).unwrap();
        assert_eq!(json["num_predict"], 128);
        assert!(json.get("temperature").is_none());
    }
}
