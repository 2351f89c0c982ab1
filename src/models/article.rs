use serde::{Deserialize, Serialize};

use crate::error::ClientError;

pub type ArticleId = u64;

/// Article author as embedded by the backend (only id and username are selected)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "ID", default)]
    pub id: u64,
    #[serde(default)]
    pub username: String,
}

/// Article summary as returned by list endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "ID")]
    pub id: ArticleId,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_id: u64,
    #[serde(default)]
    pub author: Author,
    /// Comma separated
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub bookmark_count: u64,
    #[serde(default)]
    pub vector_status: Option<String>,
    #[serde(default)]
    pub vector_progress: u8,
}

/// Single article as viewed on its detail page.
///
/// `has_access` comes from the response envelope, not from the article payload,
/// and only exists on this type. List items never carry it.
#[derive(Clone, Debug, PartialEq)]
pub struct ArticleDetail {
    pub article: Article,
    pub has_access: bool,
}

/// `GET /articles/:id` response
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ArticleEnvelope {
    pub data: Article,
    #[serde(default)]
    pub has_access: bool,
}

impl From<ArticleEnvelope> for ArticleDetail {
    fn from(envelope: ArticleEnvelope) -> Self {
        Self {
            article: envelope.data,
            has_access: envelope.has_access,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArticleKind {
    Free,
    Paid,
}

impl ArticleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArticleSort {
    /// Newest first (backend default)
    #[default]
    Latest,
    /// Most bookmarked first
    Rank,
}

/// Query parameters for `GET /articles`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArticleFilter {
    pub search: Option<String>,
    pub kind: Option<ArticleKind>,
    pub sort: ArticleSort,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.search = if query.trim().is_empty() { None } else { Some(query) };
        self
    }

    pub fn kind(mut self, kind: ArticleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn sort(mut self, sort: ArticleSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.trim().to_string()));
        }
        if let Some(kind) = self.kind {
            query.push(("type".to_string(), kind.as_str().to_string()));
        }
        if self.sort == ArticleSort::Rank {
            query.push(("sort".to_string(), "rank".to_string()));
        }
        query
    }
}

/// `POST /articles` body
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub tags: String,
    pub is_paid: bool,
    pub price: f64,
}

impl NewArticle {
    /// Checks the fields the backend marks as required
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::InvalidInput("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(ClientError::InvalidInput("Content is required".to_string()));
        }
        if self.tags.trim().is_empty() {
            return Err(ClientError::InvalidInput("At least one tag is required".to_string()));
        }
        if self.is_paid && !(self.price.is_finite() && self.price > 0.0) {
            return Err(ClientError::InvalidInput("Paid articles need a positive price".to_string()));
        }
        Ok(())
    }
}

/// Typed view over the `POST /articles/:id/bookmark` payload
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BookmarkToggle {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub bookmarked: bool,
}

impl BookmarkToggle {
    pub fn from_payload(payload: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }
}
