use std::fmt;

use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use crate::domain::entities::PostRecord;

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
pub const HUMAN_DATETIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:long] [day padding:none], [year] at [hour repr:12]:[minute] [period]"
);

/// Number of characters of `content` shown on a post card.
pub const EXCERPT_CHARS: usize = 150;

/// The three user-editable fields of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PostField {
    Title,
    Content,
    Author,
}

impl PostField {
    pub const ALL: [PostField; 3] = [PostField::Title, PostField::Content, PostField::Author];

    pub fn as_str(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Content => "content",
            PostField::Author => "author",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PostField::Title => "Title",
            PostField::Content => "Content",
            PostField::Author => "Author",
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field values of a post that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
        }
    }

    pub fn get(&self, field: PostField) -> &str {
        match field {
            PostField::Title => &self.title,
            PostField::Content => &self.content,
            PostField::Author => &self.author,
        }
    }

    pub fn set(&mut self, field: PostField, value: String) {
        match field {
            PostField::Title => self.title = value,
            PostField::Content => self.content = value,
            PostField::Author => self.author = value,
        }
    }
}

impl From<&PostRecord> for PostDraft {
    fn from(post: &PostRecord) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
        }
    }
}

/// A partial set of field values applied to an existing post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl From<PostDraft> for PostPatch {
    fn from(draft: PostDraft) -> Self {
        Self {
            title: Some(draft.title),
            content: Some(draft.content),
            author: Some(draft.author),
        }
    }
}

/// Stable newest-first ordering; posts sharing a timestamp keep their store order.
pub fn sort_newest_first(posts: &mut [PostRecord]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub fn format_human_date(at: OffsetDateTime) -> String {
    at.format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| at.date().to_string())
}

pub fn format_human_datetime(at: OffsetDateTime) -> String {
    at.format(HUMAN_DATETIME_FORMAT)
        .unwrap_or_else(|_| at.to_string())
}

/// Leading slice of `content` for list cards, always suffixed with `...`.
pub fn excerpt(content: &str) -> String {
    let mut out: String = content.chars().take(EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use uuid::Uuid;

    use super::*;

    fn post(title: &str, created_at: OffsetDateTime) -> PostRecord {
        PostRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: "body".to_string(),
            author: "Ann".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn human_dates_match_card_and_detail_layouts() {
        let at = datetime!(2025-01-05 15:04:05 UTC);
        assert_eq!(format_human_date(at), "January 5, 2025");
        assert_eq!(format_human_datetime(at), "January 5, 2025 at 03:04 PM");
    }

    #[test]
    fn excerpt_cuts_on_characters_not_bytes() {
        let content = "é".repeat(200);
        let short = excerpt(&content);
        assert_eq!(short.chars().count(), EXCERPT_CHARS + 3);
        assert!(short.ends_with("..."));

        assert_eq!(excerpt("tiny"), "tiny...");
    }

    #[test]
    fn sorting_is_newest_first_and_stable_on_ties() {
        let tie = datetime!(2025-02-01 00:00 UTC);
        let mut posts = vec![
            post("old", datetime!(2024-12-31 23:59 UTC)),
            post("tie-a", tie),
            post("new", datetime!(2025-03-01 00:00 UTC)),
            post("tie-b", tie),
        ];

        sort_newest_first(&mut posts);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["new", "tie-a", "tie-b", "old"]);
    }

    #[test]
    fn draft_converts_into_full_patch() {
        let patch = PostPatch::from(PostDraft::new("T", "C", "A"));
        assert_eq!(patch.title.as_deref(), Some("T"));
        assert_eq!(patch.content.as_deref(), Some("C"));
        assert_eq!(patch.author.as_deref(), Some("A"));
    }
}
