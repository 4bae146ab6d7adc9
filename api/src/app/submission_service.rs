//! Submission service
//!
//! The single moderation-gated path for publishing user content. Both posts
//! and comments are validated, run through the moderation gate, and only
//! then handed to the repository.

use std::sync::Arc;

use serde::Deserialize;

use super::moderation_gate::ModerationGate;
use crate::domain::entities::{
    normalize_tags, Author, Comment, NewComment, NewPost, Post, PostId, SubmittedText,
};
use crate::domain::ports::{ContentClassifier, PostRepository};
use crate::error::{AppError, DomainError};

/// Tags as sent by clients: either a list or a comma-separated string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Text(String),
}

impl Default for TagsInput {
    fn default() -> Self {
        TagsInput::List(Vec::new())
    }
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::List(tags) => normalize_tags(tags),
            TagsInput::Text(text) => normalize_tags(text.split(',')),
        }
    }
}

/// Request to publish a new post
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: TagsInput,
}

/// Request to comment on a post
#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub content: String,
}

/// Result of a submission that reached a moderation decision
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome<T> {
    Published(T),
    Rejected { message: String },
}

/// Service publishing posts and comments behind the moderation gate
pub struct SubmissionService<R, C>
where
    R: PostRepository,
    C: ContentClassifier,
{
    posts: Arc<R>,
    gate: ModerationGate<C>,
    author: Author,
}

impl<R, C> SubmissionService<R, C>
where
    R: PostRepository,
    C: ContentClassifier,
{
    pub fn new(posts: Arc<R>, gate: ModerationGate<C>) -> Self {
        Self {
            posts,
            gate,
            author: Author::member(),
        }
    }

    /// Validate, moderate and publish a post
    pub async fn create_post(
        &self,
        request: CreatePostRequest,
    ) -> Result<SubmissionOutcome<Post>, AppError> {
        let title = request.title.trim();
        let content = request.content.trim();

        if title.is_empty() || content.is_empty() {
            return Err(DomainError::Validation("Title and content are required.".to_string()).into());
        }

        let gate_result = self
            .gate
            .evaluate_submission(&SubmittedText::post(title, content))
            .await?;

        if !gate_result.allowed {
            return Ok(SubmissionOutcome::Rejected {
                message: gate_result.rejection_message.unwrap_or_default(),
            });
        }

        let post = self
            .posts
            .create_post(&NewPost {
                title: title.to_string(),
                content: content.to_string(),
                tags: request.tags.into_tags(),
                author: self.author.clone(),
            })
            .await?;

        tracing::info!(post_id = %post.id, tags = ?post.tags, "Post published");

        Ok(SubmissionOutcome::Published(post))
    }

    /// Validate, moderate and publish a comment on an existing post
    pub async fn add_comment(
        &self,
        post_id: &PostId,
        request: AddCommentRequest,
    ) -> Result<SubmissionOutcome<Comment>, AppError> {
        let content = request.content.trim();

        if content.is_empty() {
            return Err(DomainError::Validation("Comment cannot be empty.".to_string()).into());
        }

        if self.posts.find_post(post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Post {}", post_id)));
        }

        let gate_result = self
            .gate
            .evaluate_submission(&SubmittedText::comment(content))
            .await?;

        if !gate_result.allowed {
            return Ok(SubmissionOutcome::Rejected {
                message: gate_result.rejection_message.unwrap_or_default(),
            });
        }

        let comment = self
            .posts
            .add_comment(&NewComment {
                post_id: *post_id,
                content: content.to_string(),
                author: self.author.clone(),
                is_ai: false,
            })
            .await?;

        tracing::info!(post_id = %post_id, comment_id = %comment.id, "Comment published");

        Ok(SubmissionOutcome::Published(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::adapters::InMemoryPostRepository;
    use crate::error::ModerationError;
    use crate::test_utils::{create_post_request, self_harm_verdict, StubClassifier};

    fn service(
        repo: &Arc<InMemoryPostRepository>,
        classifier: &Arc<StubClassifier>,
    ) -> SubmissionService<InMemoryPostRepository, StubClassifier> {
        SubmissionService::new(
            repo.clone(),
            ModerationGate::new(classifier.clone(), Duration::from_millis(50)),
        )
    }

    #[test]
    fn test_tags_input_forms() {
        let list: CreatePostRequest =
            serde_json::from_str(r#"{"title": "t", "content": "c", "tags": ["Hope", "hope"]}"#)
                .unwrap();
        assert_eq!(list.tags.into_tags(), vec!["Hope"]);

        let text: CreatePostRequest =
            serde_json::from_str(r#"{"title": "t", "content": "c", "tags": "Anxiety, Stress,,"}"#)
                .unwrap();
        assert_eq!(text.tags.into_tags(), vec!["Anxiety", "Stress"]);

        let missing: CreatePostRequest =
            serde_json::from_str(r#"{"title": "t", "content": "c"}"#).unwrap();
        assert!(missing.tags.into_tags().is_empty());
    }

    #[tokio::test]
    async fn clean_post_is_published() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let classifier = Arc::new(StubClassifier::allowing());
        let service = service(&repo, &classifier);

        let outcome = service
            .create_post(create_post_request(
                "Small win today",
                "I finally went for a walk after a week inside.",
            ))
            .await
            .unwrap();

        let post = match outcome {
            SubmissionOutcome::Published(post) => post,
            other => panic!("Expected Published, got {:?}", other),
        };
        assert_eq!(post.author, Author::member());
        assert_eq!(post.tags, vec!["Hope"]);
        assert_eq!(repo.list_posts().await.unwrap().len(), 1);
        assert_eq!(
            classifier.inputs(),
            vec!["Small win today\nI finally went for a walk after a week inside.".to_string()]
        );
    }

    #[tokio::test]
    async fn flagged_post_is_not_persisted() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let classifier = Arc::new(StubClassifier::returning(self_harm_verdict()));
        let service = service(&repo, &classifier);

        let outcome = service
            .create_post(create_post_request("Tonight", "I want to hurt myself tonight"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected {
                message: "This submission cannot be published. Reason: self-harm ideation"
                    .to_string()
            }
        );
        assert!(repo.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_classifier_publishes_nothing() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let classifier = Arc::new(StubClassifier::failing());
        let service = service(&repo, &classifier);

        let result = service
            .create_post(create_post_request(
                "Need advice",
                "How do you all deal with a racing mind at night?",
            ))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Moderation(
                ModerationError::ClassificationUnavailable(_)
            ))
        ));
        assert!(repo.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn abandoned_submission_publishes_nothing() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let classifier = Arc::new(StubClassifier::hanging());
        let service = service(&repo, &classifier);

        // Caller gives up while the classifier is still working
        let abandoned = tokio::time::timeout(
            Duration::from_millis(10),
            service.create_post(create_post_request(
                "Cannot focus",
                "My thoughts keep spinning and I cannot settle on anything.",
            )),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(classifier.call_count(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(repo.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_title_never_reaches_gate() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let classifier = Arc::new(StubClassifier::allowing());
        let service = service(&repo, &classifier);

        let result = service
            .create_post(create_post_request("   ", "A body without any title at all"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
        assert_eq!(classifier.call_count(), 0);
    }

    #[tokio::test]
    async fn short_comment_skips_classifier_and_publishes() {
        let repo = Arc::new(InMemoryPostRepository::with_sample_posts());
        let classifier = Arc::new(StubClassifier::failing());
        let service = service(&repo, &classifier);
        let post_id = repo.list_posts().await.unwrap()[0].id;

        let outcome = service
            .add_comment(
                &post_id,
                AddCommentRequest {
                    content: "hugs ❤️".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Published(_)));
        assert_eq!(classifier.call_count(), 0);
        let post = repo.find_post(&post_id).await.unwrap().unwrap();
        assert_eq!(post.comments.last().unwrap().content, "hugs ❤️");
    }

    #[tokio::test]
    async fn flagged_comment_is_rejected() {
        let repo = Arc::new(InMemoryPostRepository::with_sample_posts());
        let classifier = Arc::new(StubClassifier::returning(self_harm_verdict()));
        let service = service(&repo, &classifier);
        let post = repo.list_posts().await.unwrap()[0].clone();

        let outcome = service
            .add_comment(
                &post.id,
                AddCommentRequest {
                    content: "I want to hurt myself tonight".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Rejected { .. }));
        let stored = repo.find_post(&post.id).await.unwrap().unwrap();
        assert_eq!(stored.comments.len(), post.comments.len());
    }

    #[tokio::test]
    async fn comment_on_unknown_post_is_not_found() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let classifier = Arc::new(StubClassifier::allowing());
        let service = service(&repo, &classifier);

        let result = service
            .add_comment(
                &PostId::new(),
                AddCommentRequest {
                    content: "This is a perfectly kind comment".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(classifier.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_comment_is_invalid() {
        let repo = Arc::new(InMemoryPostRepository::with_sample_posts());
        let classifier = Arc::new(StubClassifier::allowing());
        let service = service(&repo, &classifier);
        let post_id = repo.list_posts().await.unwrap()[0].id;

        let result = service
            .add_comment(
                &post_id,
                AddCommentRequest {
                    content: "  \n ".to_string(),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
    }
}
