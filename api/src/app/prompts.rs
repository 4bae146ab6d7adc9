//! Prompt templates for the assist features
//!
//! Every template asks for a single JSON object so replies can be parsed
//! into the output types below.

use serde::Deserialize;

use crate::domain::entities::PostId;

pub const DRAFT_POST_INSTRUCTIONS: &str = r#"You are a compassionate AI assistant designed to help users express their feelings in a supportive online community.

Based on the user's short description of their emotional state, generate a more detailed and empathetic starting point for their post, written in the first person.

Respond with a JSON object: {"generatedPostText": "<the post text>"}"#;

pub const SUGGEST_TAGS_INSTRUCTIONS: &str = r#"You are an AI assistant designed to suggest relevant emotional tags for user posts on a mental health support platform.

Given the post content, suggest up to 5 emotional tags that best categorize the user's feelings. The tags should be short, relevant, and commonly used to describe emotions.

Respond with a JSON object: {"tags": ["<tag>", ...]}"#;

pub const EMPATHETIC_REPLY_INSTRUCTIONS: &str = r#"You are a compassionate and supportive AI assistant designed to provide empathetic responses to users expressing their mental and emotional struggles.

Your goal is to offer comfort, guidance, and validation without judgment. Include coping tips and self-care suggestions where appropriate.

Respond with a JSON object: {"aiResponse": "<your response>"}"#;

pub const SUMMARIZE_FEEDBACK_INSTRUCTIONS: &str = r#"You summarize the feedback a user received on their post in a mental health support community. Highlight the most helpful advice and common themes.

Respond with a JSON object: {"summary": "<the summary>"}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOutput {
    pub generated_post_text: String,
}

#[derive(Debug, Deserialize)]
pub struct TagsOutput {
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpatheticReplyOutput {
    pub ai_response: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryOutput {
    pub summary: String,
}

/// Render the comments of a post as the summary prompt input
pub fn feedback_input(post_id: &PostId, feedback: &[String]) -> String {
    let mut input = format!("Feedback received on post {}:\n", post_id);
    for item in feedback {
        input.push_str("- ");
        input.push_str(item);
        input.push('\n');
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_feedback_input_lists_each_comment() {
        let post_id = PostId(Uuid::nil());
        let input = feedback_input(&post_id, &["Try journaling".to_string(), "Go outside".to_string()]);

        assert_eq!(
            input,
            "Feedback received on post 00000000-0000-0000-0000-000000000000:\n- Try journaling\n- Go outside\n"
        );
    }

    #[test]
    fn test_outputs_use_camel_case_keys() {
        let draft: DraftOutput =
            serde_json::from_str(r#"{"generatedPostText": "I have been feeling"}"#).unwrap();
        assert_eq!(draft.generated_post_text, "I have been feeling");

        let reply: EmpatheticReplyOutput =
            serde_json::from_str(r#"{"aiResponse": "You are not alone"}"#).unwrap();
        assert_eq!(reply.ai_response, "You are not alone");
    }
}
