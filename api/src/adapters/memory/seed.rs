//! Sample community feed loaded into a fresh in-memory store

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{Author, Comment, CommentId, Post, PostId};

fn koala() -> Author {
    Author {
        id: "user-2".to_string(),
        name: "Anonymous Koala".to_string(),
        avatar: "https://placehold.co/40x40/E3F2FD/202A38?text=K".to_string(),
    }
}

fn comment(
    post_id: PostId,
    author: Author,
    content: &str,
    created_at: DateTime<Utc>,
    helpful: i32,
    not_helpful: i32,
) -> Comment {
    Comment {
        id: CommentId::new(),
        post_id,
        author,
        content: content.to_string(),
        created_at,
        helpful,
        not_helpful,
        is_ai: false,
    }
}

/// Three sample posts, newest first
pub fn sample_posts(now: DateTime<Utc>) -> Vec<Post> {
    let anxiety_id = PostId::new();
    let loneliness_id = PostId::new();
    let lost_id = PostId::new();

    vec![
        Post {
            id: anxiety_id,
            title: "Feeling overwhelmed with anxiety lately".to_string(),
            content: "Lately, I've been feeling a constant sense of dread and my anxiety has been \
                      through the roof. It's hard to focus on work or even things I usually enjoy. \
                      It feels like a heavy weight I can't shake off. Just wanted to share and see \
                      if anyone else has felt this way."
                .to_string(),
            author: Author::member(),
            tags: vec![
                "Anxiety".to_string(),
                "Stress".to_string(),
                "Overwhelmed".to_string(),
            ],
            created_at: now - Duration::days(3),
            comments: vec![
                comment(
                    anxiety_id,
                    koala(),
                    "I'm sorry to hear you're going through this. Remember to be kind to \
                     yourself. Have you tried any mindfulness exercises? They sometimes help me \
                     when I feel overwhelmed.",
                    now - Duration::days(2),
                    15,
                    1,
                ),
                comment(
                    anxiety_id,
                    Author::member(),
                    "It sounds really tough. What you're feeling is valid. Sending you support.",
                    now - Duration::days(1),
                    12,
                    0,
                ),
            ],
        },
        Post {
            id: loneliness_id,
            title: "Struggling with loneliness after moving to a new city".to_string(),
            content: "I moved for a new job a few months ago and I'm finding it incredibly hard \
                      to connect with people. The loneliness is starting to get to me, and it's \
                      making me question my decision. Any advice on making friends in a new place \
                      would be appreciated."
                .to_string(),
            author: koala(),
            tags: vec![
                "Loneliness".to_string(),
                "Relationships".to_string(),
                "Depression".to_string(),
            ],
            created_at: now - Duration::days(5),
            comments: vec![comment(
                loneliness_id,
                Author::member(),
                "Moving to a new city is so hard! Maybe you could try joining local groups for \
                 hobbies you enjoy? That helped me meet like-minded people.",
                now - Duration::days(4),
                25,
                2,
            )],
        },
        Post {
            id: lost_id,
            title: "Is it normal to feel this lost in your 20s?".to_string(),
            content: "I feel like all my friends have their lives figured out, and I'm just... \
                      floating. I don't know what I want to do with my career or my life in \
                      general. It's causing a lot of stress and self-doubt."
                .to_string(),
            author: Author::member(),
            tags: vec![
                "Stress".to_string(),
                "Self-doubt".to_string(),
                "Career".to_string(),
            ],
            created_at: now - Duration::weeks(1),
            comments: vec![],
        },
    ]
}
