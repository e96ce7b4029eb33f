//! Prompt assembly for the research assistant
//!
//! Builds the fixed message list sent to the model: a system instruction, a
//! human instruction embedding the query and format instructions, and the
//! lookup context appended as an additional message.

use crate::clients::ChatMessage;

/// Standing instruction sent with every research request
pub const SYSTEM_PROMPT: &str = "You are a research assistant that helps generate concise, \
     well-sourced research summaries. Answer the user's query using the provided context. \
     Wrap the output in the requested JSON format and provide no other text.";

/// Output-format instruction naming the schema fields
///
/// The model is asked for a bare JSON object; fenced replies are tolerated
/// downstream by the extractor.
pub fn format_instructions() -> String {
    "Respond with a single JSON object with exactly these fields:\n\
     {\n\
       \"topic\": string,\n\
       \"summary\": string,\n\
       \"sources\": array of strings,\n\
       \"tools_used\": array of strings\n\
     }\n\
     Do not include explanations, markdown fences, or other text."
        .to_string()
}

/// Build the full research prompt
///
/// The lookup summary rides in a separate trailing message so the context
/// stays distinguishable from the instruction.
pub fn research_messages(query: &str, lookup_summary: &str, lookup_label: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Research the following topic and respond in the required format.\n\n\
             Topic: {}\n\n{}",
            query,
            format_instructions()
        )),
        ChatMessage::user(format!(
            "Context from {}:\n{}",
            lookup_label, lookup_summary
        )),
    ]
}
