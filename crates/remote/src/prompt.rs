use vibe_core::{FormatKind, PrettyConfig};

use crate::wire::{ChatCompletionRequest, ChatMessage};

pub fn instruction_for(kind: FormatKind) -> &'static str {
    match kind {
        FormatKind::Json => {
            "Format this JSON for readability with proper indentation and sorting. Only return the formatted JSON, no explanations:"
        }
        FormatKind::Xml => {
            "Format this XML with proper indentation and structure. Only return the formatted XML, no explanations:"
        }
        FormatKind::Yaml => {
            "Format this YAML with consistent indentation and structure. Only return the formatted YAML, no explanations:"
        }
        FormatKind::Text => {
            "Format this text for better readability with proper spacing and structure. Only return the formatted text:"
        }
    }
}

pub fn build_request(config: &PrettyConfig, text: &str, kind: FormatKind) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(config.system_prompt.as_str()),
            ChatMessage::user(format!("{}\n\n{}", instruction_for(kind), text)),
        ],
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}
