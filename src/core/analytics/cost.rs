//! Token and cost estimation for probe traffic
//!
//! Tokens are estimated at four characters each and priced per 1K tokens
//! with the rates of each provider's default probe model.

use crate::core::providers::ProviderKind;

/// Price per 1K tokens for a provider's probe model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_cost_per_1k_tokens: f64,
    pub output_cost_per_1k_tokens: f64,
}

/// Pricing of each provider's default probe model.
///
/// A target configured with another model is still priced at these rates.
pub fn probe_pricing(provider: ProviderKind) -> ModelPricing {
    let (input, output) = match provider {
        ProviderKind::OpenAi => (0.000_15, 0.000_6),
        ProviderKind::Anthropic => (0.000_8, 0.004),
        ProviderKind::Gemini => (0.000_075, 0.000_3),
        ProviderKind::DeepSeek => (0.000_27, 0.001_1),
        ProviderKind::OpenRouter => (0.000_15, 0.000_6),
    };
    ModelPricing {
        input_cost_per_1k_tokens: input,
        output_cost_per_1k_tokens: output,
    }
}

/// Roughly four characters per token, at least one token for non-empty text
pub fn estimate_tokens(text: &str) -> u32 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0;
    }
    u32::try_from(chars.div_ceil(4)).unwrap_or(u32::MAX)
}

/// Convert a token count to cost
pub fn tokens_to_cost(tokens: u32, cost_per_1k: f64) -> f64 {
    tokens as f64 / 1000.0 * cost_per_1k
}

/// Estimated USD cost of one call
pub fn estimate_cost(provider: ProviderKind, input_tokens: u32, output_tokens: u32) -> f64 {
    let pricing = probe_pricing(provider);
    tokens_to_cost(input_tokens, pricing.input_cost_per_1k_tokens)
        + tokens_to_cost(output_tokens, pricing.output_cost_per_1k_tokens)
}
