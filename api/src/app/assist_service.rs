//! Assist service
//!
//! Generative helpers around posting: drafting a post from a short mood
//! description, suggesting tags, writing an empathetic AI reply, and
//! summarizing the feedback a post received.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::prompts::{
    feedback_input, DraftOutput, EmpatheticReplyOutput, SummaryOutput, TagsOutput,
    DRAFT_POST_INSTRUCTIONS, EMPATHETIC_REPLY_INSTRUCTIONS, SUGGEST_TAGS_INSTRUCTIONS,
    SUMMARIZE_FEEDBACK_INSTRUCTIONS,
};
use crate::domain::entities::{normalize_tags, Author, Comment, NewComment, PostId};
use crate::domain::ports::{PostRepository, TextGenerator};
use crate::error::{AiError, AppError, DomainError};

/// Maximum number of tags returned by `suggest_tags`
pub const MAX_SUGGESTED_TAGS: usize = 5;

/// Posted as the AI reply when generation fails
pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't generate a response at the moment. \
                                  Please know that your feelings are valid.";

/// Returned for posts without any comments
pub const NO_FEEDBACK_SUMMARY: &str = "There is no feedback yet for this post.";

/// Service for AI-assisted writing and summaries
pub struct AssistService<R, G>
where
    R: PostRepository,
    G: TextGenerator,
{
    posts: Arc<R>,
    generator: Arc<G>,
    timeout: Duration,
}

impl<R, G> AssistService<R, G>
where
    R: PostRepository,
    G: TextGenerator,
{
    pub fn new(posts: Arc<R>, generator: Arc<G>, timeout: Duration) -> Self {
        Self {
            posts,
            generator,
            timeout,
        }
    }

    async fn generate<T: DeserializeOwned>(
        &self,
        instructions: &str,
        input: &str,
    ) -> Result<T, AiError> {
        let value = tokio::time::timeout(
            self.timeout,
            self.generator.generate_json(instructions, input),
        )
        .await
        .map_err(|_| AiError::Timeout)??;

        serde_json::from_value(value).map_err(|e| AiError::Malformed(e.to_string()))
    }

    /// Expand a short emotional-state description into a post draft
    pub async fn draft_post(&self, description: &str) -> Result<String, AppError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(DomainError::Validation(
                "Describe how you are feeling to get a suggestion.".to_string(),
            )
            .into());
        }

        let output: DraftOutput = self.generate(DRAFT_POST_INSTRUCTIONS, description).await?;
        let text = output.generated_post_text.trim();
        if text.is_empty() {
            return Err(AiError::EmptyResponse.into());
        }

        Ok(text.to_string())
    }

    /// Suggest up to five emotional tags for post content
    pub async fn suggest_tags(&self, content: &str) -> Result<Vec<String>, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation(
                "Write some content before asking for tags.".to_string(),
            )
            .into());
        }

        let output: TagsOutput = self.generate(SUGGEST_TAGS_INSTRUCTIONS, content).await?;
        let mut tags = normalize_tags(output.tags);
        tags.truncate(MAX_SUGGESTED_TAGS);

        Ok(tags)
    }

    /// Write an empathetic reply to a post and publish it as an AI comment.
    ///
    /// Generation failures never surface: the canned fallback is posted instead.
    pub async fn empathetic_reply(&self, post_id: &PostId) -> Result<Comment, AppError> {
        let post = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {}", post_id)))?;

        let reply = match self
            .generate::<EmpatheticReplyOutput>(EMPATHETIC_REPLY_INSTRUCTIONS, &post.content)
            .await
        {
            Ok(output) if !output.ai_response.trim().is_empty() => {
                output.ai_response.trim().to_string()
            }
            Ok(_) => {
                tracing::warn!(post_id = %post_id, "AI reply was empty, using fallback");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(post_id = %post_id, error = %e, "AI reply failed, using fallback");
                FALLBACK_REPLY.to_string()
            }
        };

        let comment = self
            .posts
            .add_comment(&NewComment {
                post_id: *post_id,
                content: reply,
                author: Author::assistant(),
                is_ai: true,
            })
            .await?;

        Ok(comment)
    }

    /// Summarize the comments on a post
    pub async fn summarize_feedback(&self, post_id: &PostId) -> Result<String, AppError> {
        let post = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {}", post_id)))?;

        if post.comments.is_empty() {
            return Ok(NO_FEEDBACK_SUMMARY.to_string());
        }

        let feedback: Vec<String> = post.comments.iter().map(|c| c.content.clone()).collect();
        let output: SummaryOutput = self
            .generate(
                SUMMARIZE_FEEDBACK_INSTRUCTIONS,
                &feedback_input(post_id, &feedback),
            )
            .await
            .map_err(|e| {
                tracing::error!(post_id = %post_id, error = %e, "Failed to summarize feedback");
                e
            })?;

        Ok(output.summary.trim().to_string())
    }
}
