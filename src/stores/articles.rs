use std::cell::{Cell, RefCell};

use serde_json::Value;

use crate::error::ClientError;
use crate::models::{Article, ArticleDetail, ArticleFilter, ArticleId, NewArticle};
use crate::services::ApiClient;
use crate::stores::{next_generation, LoadingGuard, Refresh};

#[derive(Clone, Debug, Default)]
struct ArticleState {
    articles: Vec<Article>,
    current: Option<ArticleDetail>,
}

/// Article listing, detail and article mutations.
///
/// Browsing (`fetch_articles`) is best effort. Everything else propagates its
/// error. Mutations never touch the cached list; re-fetch to see their effect.
pub struct ContentStore {
    api: ApiClient,
    state: RefCell<ArticleState>,
    in_flight: Cell<u32>,
    list_generation: Cell<u64>,
    detail_generation: Cell<u64>,
}

impl ContentStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RefCell::new(ArticleState::default()),
            in_flight: Cell::new(0),
            list_generation: Cell::new(0),
            detail_generation: Cell::new(0),
        }
    }

    pub fn articles(&self) -> Vec<Article> {
        self.state.borrow().articles.clone()
    }

    pub fn current_article(&self) -> Option<ArticleDetail> {
        self.state.borrow().current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    /// Replace the article list with the backend's answer for `filter`.
    ///
    /// Only the latest call may write the list; an older response that
    /// resolves late is dropped.
    pub async fn fetch_articles(&self, filter: &ArticleFilter) -> Refresh {
        let generation = next_generation(&self.list_generation);
        let _loading = LoadingGuard::new(&self.in_flight);

        match self.api.list_articles(filter).await {
            Ok(articles) => {
                if self.list_generation.get() != generation {
                    log::debug!("Dropping stale article list response");
                    return Refresh::Superseded;
                }
                log::info!("Loaded {} articles", articles.len());
                self.state.borrow_mut().articles = articles;
                Refresh::Updated
            }
            Err(e) => {
                log::error!("Fetch articles failed: {}", e);
                Refresh::Kept
            }
        }
    }

    /// Load a single article together with the caller's access to it.
    ///
    /// The result is always returned, but only cached as the current article
    /// if no newer `fetch_article` was issued meanwhile.
    pub async fn fetch_article(&self, id: ArticleId) -> Result<ArticleDetail, ClientError> {
        let generation = next_generation(&self.detail_generation);
        let _loading = LoadingGuard::new(&self.in_flight);

        let detail = self.api.get_article(id).await.map_err(|e| {
            log::error!("Fetch article {} failed: {}", id, e);
            e
        })?;

        if self.detail_generation.get() == generation {
            self.state.borrow_mut().current = Some(detail.clone());
        } else {
            log::debug!("Not caching stale article {}", id);
        }
        Ok(detail)
    }

    pub async fn create_article(&self, article: &NewArticle) -> Result<(), ClientError> {
        self.api.create_article(article).await.map_err(|e| {
            log::error!("Create article failed: {}", e);
            e
        })?;
        log::info!("Article created: {}", article.title);
        Ok(())
    }

    pub async fn delete_article(&self, id: ArticleId) -> Result<(), ClientError> {
        self.api.delete_article(id).await.map_err(|e| {
            log::error!("Delete article {} failed: {}", id, e);
            e
        })
    }

    /// Toggle the bookmark server-side and hand back the raw payload
    pub async fn bookmark_article(&self, id: ArticleId) -> Result<Value, ClientError> {
        self.api.bookmark_article(id).await.map_err(|e| {
            log::error!("Bookmark article {} failed: {}", id, e);
            e
        })
    }

    /// Ask the backend to rebuild the article's search index
    pub async fn reindex_article(&self, id: ArticleId) -> Result<(), ClientError> {
        self.api.reindex_article(id).await.map_err(|e| {
            log::error!("Re-index article {} failed: {}", id, e);
            e
        })
    }

    /// The caller's own articles. Returned only, the shared list is not touched.
    pub async fn fetch_user_articles(&self) -> Result<Vec<Article>, ClientError> {
        let _loading = LoadingGuard::new(&self.in_flight);
        self.api.user_articles().await.map_err(|e| {
            log::error!("Fetch user articles failed: {}", e);
            e
        })
    }

    /// The caller's bookmarks. Returned only, the shared list is not touched.
    pub async fn fetch_user_bookmarks(&self) -> Result<Vec<Article>, ClientError> {
        let _loading = LoadingGuard::new(&self.in_flight);
        self.api.user_bookmarks().await.map_err(|e| {
            log::error!("Fetch user bookmarks failed: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::HttpMethod;
    use crate::stores::test_support::api;
    use serde_json::json;

    fn ids(articles: &[Article]) -> Vec<ArticleId> {
        articles.iter().map(|a| a.id).collect()
    }

    #[tokio::test]
    async fn test_fetch_articles_replaces_list() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 1 }, { "ID": 2 }] }));
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 3 }] }));

        assert_eq!(store.fetch_articles(&ArticleFilter::new()).await, Refresh::Updated);
        assert_eq!(ids(&store.articles()), vec![1, 2]);

        assert_eq!(store.fetch_articles(&ArticleFilter::new()).await, Refresh::Updated);
        assert_eq!(ids(&store.articles()), vec![3]);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_failed_fetch_articles_keeps_list() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 1 }, { "ID": 2 }] }));
        transport.respond(HttpMethod::Get, "/articles", 500, json!({ "error": "Failed to fetch articles" }));

        store.fetch_articles(&ArticleFilter::new()).await;
        let outcome = store.fetch_articles(&ArticleFilter::new()).await;

        assert_eq!(outcome, Refresh::Kept);
        assert_eq!(ids(&store.articles()), vec![1, 2]);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_stale_list_response_is_dropped() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        let release_first = transport.hold(HttpMethod::Get, "/articles");
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 1 }] }));
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 2 }] }));

        let old_filter = ArticleFilter::new().search("old");
        let first = store.fetch_articles(&old_filter);
        let second = async {
            let outcome = store.fetch_articles(&ArticleFilter::new().search("new")).await;
            let _ = release_first.send(());
            outcome
        };
        let (first, second) = futures::join!(first, second);

        assert_eq!(second, Refresh::Updated);
        assert_eq!(first, Refresh::Superseded);
        assert_eq!(ids(&store.articles()), vec![2]);
    }

    #[tokio::test]
    async fn test_loading_clears_when_superseded_request_settles() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        let release_first = transport.hold(HttpMethod::Get, "/articles");
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 1 }] }));
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [] }));

        let slow_filter = ArticleFilter::new().search("slow");
        let fast_filter = ArticleFilter::new().search("fast");
        // Each branch samples the flag right after its own fetch settles
        let first = async {
            let outcome = store.fetch_articles(&slow_filter).await;
            (outcome, store.is_loading())
        };
        let second = async {
            let outcome = store.fetch_articles(&fast_filter).await;
            let loading = store.is_loading();
            let _ = release_first.send(());
            (outcome, loading)
        };
        let ((first, loading_after_first), (second, loading_after_second)) =
            futures::join!(first, second);

        assert_eq!(second, Refresh::Updated);
        assert!(loading_after_second);
        assert_eq!(first, Refresh::Superseded);
        assert!(!loading_after_first);
        assert!(store.articles().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_article_attaches_envelope_access() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(
            HttpMethod::Get,
            "/articles/5",
            200,
            json!({ "data": { "ID": 5, "title": "Paid", "is_paid": true }, "has_access": true }),
        );

        let detail = store.fetch_article(5).await.unwrap();
        assert!(detail.has_access);
        assert_eq!(detail.article.id, 5);

        let current = store.current_article().unwrap();
        assert!(current.has_access);
        assert_eq!(current.article.title, "Paid");
        // The list is a separate cache
        assert!(store.articles().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_article_missing_access_defaults_to_false() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(HttpMethod::Get, "/articles/6", 200, json!({ "data": { "ID": 6 } }));

        assert!(!store.fetch_article(6).await.unwrap().has_access);
    }

    #[tokio::test]
    async fn test_fetch_article_error_propagates() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(HttpMethod::Get, "/articles/9", 404, json!({ "error": "Article not found" }));

        let err = store.fetch_article(9).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(store.current_article().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_mutations_do_not_touch_list() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 1 }] }));
        store.fetch_articles(&ArticleFilter::new()).await;

        transport.respond(HttpMethod::Post, "/articles", 200, json!({ "data": { "ID": 2 } }));
        transport.respond(HttpMethod::Delete, "/articles/1", 200, json!({ "message": "Article deleted" }));

        let article = NewArticle {
            title: "T".to_string(),
            content: "C".to_string(),
            tags: "x".to_string(),
            ..Default::default()
        };
        store.create_article(&article).await.unwrap();
        store.delete_article(1).await.unwrap();

        assert_eq!(ids(&store.articles()), vec![1]);
        let sent = transport.requests_to(HttpMethod::Post, "/articles");
        assert_eq!(sent[0].body.as_ref().unwrap()["title"], "T");
    }

    #[tokio::test]
    async fn test_delete_error_propagates() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(
            HttpMethod::Delete,
            "/articles/4",
            403,
            json!({ "error": "Not authorized to delete this article" }),
        );

        let err = store.delete_article(4).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_bookmark_returns_raw_payload() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        let payload = json!({ "message": "Article bookmarked", "bookmarked": true });
        transport.respond(HttpMethod::Post, "/articles/3/bookmark", 200, payload.clone());

        assert_eq!(store.bookmark_article(3).await.unwrap(), payload);
        assert!(store.articles().is_empty());
        assert!(store.current_article().is_none());
    }

    #[tokio::test]
    async fn test_user_lists_are_returned_not_stored() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 1 }] }));
        transport.respond(HttpMethod::Get, "/user/articles", 200, json!({ "data": [{ "ID": 7 }, { "ID": 8 }] }));
        transport.respond(HttpMethod::Get, "/user/bookmarks", 200, json!({ "data": [{ "ID": 9 }] }));
        store.fetch_articles(&ArticleFilter::new()).await;

        let mine = store.fetch_user_articles().await.unwrap();
        let saved = store.fetch_user_bookmarks().await.unwrap();

        assert_eq!(ids(&mine), vec![7, 8]);
        assert_eq!(ids(&saved), vec![9]);
        assert_eq!(ids(&store.articles()), vec![1]);
    }

    #[tokio::test]
    async fn test_user_list_errors_propagate() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.fail(HttpMethod::Get, "/user/articles", ClientError::Network("offline".to_string()));
        transport.respond(HttpMethod::Get, "/user/bookmarks", 401, json!({ "error": "Unauthorized" }));

        assert!(matches!(store.fetch_user_articles().await, Err(ClientError::Network(_))));
        assert!(store.fetch_user_bookmarks().await.unwrap_err().is_unauthorized());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_reindex() {
        let (api, transport) = api();
        let store = ContentStore::new(api);
        transport.respond(HttpMethod::Post, "/articles/2/reindex", 200, json!({ "message": "Re-indexing triggered" }));

        store.reindex_article(2).await.unwrap();
        assert_eq!(transport.requests_to(HttpMethod::Post, "/articles/2/reindex").len(), 1);
    }
}
