//! Post and comment domain entities
//!
//! Posts are anonymous: authors are known only by an alias and avatar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CommentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anonymous author identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl Author {
    /// The community member posting through this instance
    pub fn member() -> Self {
        Self {
            id: "user-1".to_string(),
            name: "Anonymous Panda".to_string(),
            avatar: "https://placehold.co/40x40/E3F2FD/202A38?text=P".to_string(),
        }
    }

    /// The assistant persona used for AI-written comments
    pub fn assistant() -> Self {
        Self {
            id: "user-3".to_string(),
            name: "AI Assistant".to_string(),
            avatar: "https://placehold.co/40x40/A5D6A7/202A38?text=AI".to_string(),
        }
    }
}

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub helpful: i32,
    pub not_helpful: i32,
    pub is_ai: bool,
}

/// A community post with its comments (oldest comment first)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim()))
    }

    /// Sum of helpful ratings across all comments
    pub fn helpful_total(&self) -> i64 {
        self.comments.iter().map(|c| i64::from(c.helpful)).sum()
    }
}

/// Data for creating a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author: Author,
}

/// Data for adding a comment to a post
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostId,
    pub content: String,
    pub author: Author,
    pub is_ai: bool,
}

/// Reader feedback on a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Helpful,
    #[serde(alias = "notHelpful")]
    NotHelpful,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Helpful => write!(f, "helpful"),
            Rating::NotHelpful => write!(f, "not_helpful"),
        }
    }
}

impl std::str::FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "helpful" => Ok(Rating::Helpful),
            "not_helpful" | "nothelpful" | "not-helpful" => Ok(Rating::NotHelpful),
            _ => Err(format!("Unknown rating: {}", s)),
        }
    }
}

/// Normalize user-entered tags: trim, drop blanks, de-duplicate ignoring case.
/// First spelling wins and input order is kept.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || out.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

/// Human-friendly age of a timestamp, e.g. "Just now" or "3 days ago"
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);

    let (amount, unit) = if elapsed.num_minutes() < 1 {
        return "Just now".to_string();
    } else if elapsed.num_hours() < 1 {
        (elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_days() < 365 {
        (elapsed.num_days() / 30, "month")
    } else {
        (elapsed.num_days() / 365, "year")
    };

    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relative_time() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "Just now");
        assert_eq!(relative_time(now - Duration::seconds(59), now), "Just now");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(relative_time(now - Duration::days(3), now), "3 days ago");
        assert_eq!(relative_time(now - Duration::days(65), now), "2 months ago");
        assert_eq!(relative_time(now - Duration::days(400), now), "1 year ago");
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(["Anxiety", " stress ", "", "anxiety", "Stress", "Hope"]);
        assert_eq!(tags, vec!["Anxiety", "stress", "Hope"]);
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!("helpful".parse::<Rating>().unwrap(), Rating::Helpful);
        assert_eq!("notHelpful".parse::<Rating>().unwrap(), Rating::NotHelpful);
        assert_eq!("not_helpful".parse::<Rating>().unwrap(), Rating::NotHelpful);
        assert!("meh".parse::<Rating>().is_err());
    }

    #[test]
    fn test_has_tag_ignores_case() {
        let post = Post {
            id: PostId::new(),
            title: "t".to_string(),
            content: "c".to_string(),
            author: Author::member(),
            tags: vec!["Loneliness".to_string()],
            created_at: Utc::now(),
            comments: vec![],
        };
        assert!(post.has_tag("loneliness"));
        assert!(post.has_tag(" LONELINESS "));
        assert!(!post.has_tag("Anxiety"));
    }
}
