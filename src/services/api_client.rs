//! CoinWave REST API client
//!
//! One method per backend endpoint. The bearer token lives in memory and is
//! shared by every clone of the client; the session store is its only writer.
//! No retries, no caching.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ClientError;
use crate::models::{
    Article, ArticleDetail, ArticleFilter, ArticleId, AssistantAnswer, BalanceResponse,
    Credentials, DataEnvelope, LoginResponse, NewArticle, RankingPeriod, Rates,
};
use crate::models::article::ArticleEnvelope;
use crate::services::transport::{ApiRequest, HttpMethod, HttpTransport};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    bearer: Rc<RefCell<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            bearer: Rc::new(RefCell::new(None)),
        }
    }

    /// Token sent as `Authorization: Bearer` from now on. Empty clears it.
    pub(crate) fn set_bearer(&self, token: &str) {
        *self.bearer.borrow_mut() = if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        };
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ============================================================================
    // Auth
    // ============================================================================

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let body = self.post("/auth/login", Some(serde_json::to_value(credentials)?)).await?;
        decode(body)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.post("/auth/register", Some(serde_json::to_value(credentials)?)).await?;
        Ok(())
    }

    // ============================================================================
    // Articles
    // ============================================================================

    pub async fn list_articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>, ClientError> {
        let body = self
            .request(HttpMethod::Get, "/articles", filter.to_query(), None)
            .await?;
        decode_list(body)
    }

    pub async fn get_article(&self, id: ArticleId) -> Result<ArticleDetail, ClientError> {
        let body = self.get(&format!("/articles/{}", id)).await?;
        let envelope: ArticleEnvelope = decode(body)?;
        Ok(envelope.into())
    }

    pub async fn create_article(&self, article: &NewArticle) -> Result<(), ClientError> {
        self.post("/articles", Some(serde_json::to_value(article)?)).await?;
        Ok(())
    }

    pub async fn delete_article(&self, id: ArticleId) -> Result<(), ClientError> {
        self.request(HttpMethod::Delete, &format!("/articles/{}", id), Vec::new(), None)
            .await?;
        Ok(())
    }

    /// Returns the raw payload; the backend toggles and reports the new state
    pub async fn bookmark_article(&self, id: ArticleId) -> Result<Value, ClientError> {
        self.post(&format!("/articles/{}/bookmark", id), None).await
    }

    pub async fn purchase_article(&self, id: ArticleId) -> Result<(), ClientError> {
        self.post(&format!("/articles/{}/purchase", id), None).await?;
        Ok(())
    }

    pub async fn reindex_article(&self, id: ArticleId) -> Result<(), ClientError> {
        self.post(&format!("/articles/{}/reindex", id), None).await?;
        Ok(())
    }

    // ============================================================================
    // User
    // ============================================================================

    pub async fn user_articles(&self) -> Result<Vec<Article>, ClientError> {
        decode_list(self.get("/user/articles").await?)
    }

    pub async fn user_bookmarks(&self) -> Result<Vec<Article>, ClientError> {
        decode_list(self.get("/user/bookmarks").await?)
    }

    // ============================================================================
    // Reference data
    // ============================================================================

    pub async fn rates(&self) -> Result<Rates, ClientError> {
        let envelope: DataEnvelope<Option<Rates>> = decode(self.get("/rates").await?)?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub async fn rankings(&self, period: RankingPeriod) -> Result<Vec<Article>, ClientError> {
        let query = vec![("period".to_string(), period.as_str().to_string())];
        let body = self.request(HttpMethod::Get, "/rankings", query, None).await?;
        decode_list(body)
    }

    // ============================================================================
    // Wallet
    // ============================================================================

    pub async fn balance(&self) -> Result<f64, ClientError> {
        let response: BalanceResponse = decode(self.get("/wallet/balance").await?)?;
        Ok(response.balance)
    }

    pub async fn deposit(&self, amount: f64) -> Result<(), ClientError> {
        self.post("/wallet/deposit", Some(json!({ "amount": amount })))
            .await?;
        Ok(())
    }

    // ============================================================================
    // Assistant
    // ============================================================================

    pub async fn ask(&self, question: &str) -> Result<AssistantAnswer, ClientError> {
        decode(self.post("/rag/query", Some(json!({ "question": question }))).await?)
    }

    // ============================================================================
    // Plumbing
    // ============================================================================

    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(HttpMethod::Get, path, Vec::new(), None).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        self.request(HttpMethod::Post, path, Vec::new(), body).await
    }

    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            url: format!("{}{}", self.base_url, path),
            query,
            body,
            bearer: self.bearer.borrow().clone(),
        };

        log::debug!("{} {}", method, path);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(ClientError::Http {
                status: response.status,
                message: error_message(response.status, &response.body),
            });
        }

        Ok(response.body)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ClientError> {
    Ok(serde_json::from_value(body)?)
}

/// `{ "data": [...] }`, where the backend may send `null` for an empty list
fn decode_list(body: Value) -> Result<Vec<Article>, ClientError> {
    let envelope: DataEnvelope<Option<Vec<Article>>> = decode(body)?;
    Ok(envelope.data.unwrap_or_default())
}

/// Backend errors look like `{ "error": "..." }`
fn error_message(status: u16, body: &Value) -> String {
    let message = match body {
        Value::Object(map) => map
            .get("error")
            .or_else(|| map.get("message"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    };
    message.unwrap_or_else(|| format!("Request failed with status {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleKind, ArticleSort};
    use crate::services::transport::mock::MockTransport;

    fn client() -> (ApiClient, Rc<MockTransport>) {
        let transport = MockTransport::new();
        let client = ApiClient::new("http://backend.test/api/v1/", transport.clone());
        (client, transport)
    }

    #[tokio::test]
    async fn test_bearer_attached() {
        let (client, transport) = client();
        client.set_bearer("tok-1");
        transport.respond(HttpMethod::Get, "/wallet/balance", 200, json!({ "balance": 12.0 }));

        assert_eq!(client.balance().await.unwrap(), 12.0);

        let sent = transport.requests_to(HttpMethod::Get, "/wallet/balance");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer.as_deref(), Some("tok-1"));
        assert_eq!(sent[0].url, "http://backend.test/api/v1/wallet/balance");
    }

    #[tokio::test]
    async fn test_bearer_shared_between_clones() {
        let (client, transport) = client();
        for _ in 0..3 {
            transport.respond(HttpMethod::Get, "/rates", 200, json!({ "data": { "USD": 1.0 } }));
        }

        client.rates().await.unwrap();
        let other = client.clone();
        other.set_bearer("tok-2");
        client.rates().await.unwrap();
        other.set_bearer("");
        client.rates().await.unwrap();

        let bearers: Vec<Option<String>> = transport.requests().into_iter().map(|r| r.bearer).collect();
        assert_eq!(bearers, vec![None, Some("tok-2".to_string()), None]);
    }

    #[tokio::test]
    async fn test_list_articles_sends_filter_query() {
        let (client, transport) = client();
        transport.respond(HttpMethod::Get, "/articles", 200, json!({ "data": [{ "ID": 1 }, { "ID": 2 }] }));

        let filter = ArticleFilter::new().kind(ArticleKind::Free).sort(ArticleSort::Rank);
        let articles = client.list_articles(&filter).await.unwrap();
        assert_eq!(articles.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);

        let sent = &transport.requests()[0];
        assert_eq!(
            sent.query,
            vec![
                ("type".to_string(), "free".to_string()),
                ("sort".to_string(), "rank".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_null_list_is_empty() {
        let (client, transport) = client();
        transport.respond(HttpMethod::Get, "/user/bookmarks", 200, json!({ "data": null }));

        assert!(client.user_bookmarks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_carries_backend_message() {
        let (client, transport) = client();
        transport.respond(
            HttpMethod::Post,
            "/articles/3/purchase",
            400,
            json!({ "error": "Insufficient balance" }),
        );

        let err = client.purchase_article(3).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Http { status: 400, message: "Insufficient balance".to_string() }
        );
    }

    #[tokio::test]
    async fn test_decode_error_on_unexpected_shape() {
        let (client, transport) = client();
        transport.respond(HttpMethod::Get, "/wallet/balance", 200, json!({ "amount": 1 }));

        assert!(matches!(client.balance().await, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_rankings_period_query() {
        let (client, transport) = client();
        transport.respond(HttpMethod::Get, "/rankings", 200, json!({ "data": [] }));

        client.rankings(RankingPeriod::Monthly).await.unwrap();
        assert_eq!(
            transport.requests()[0].query,
            vec![("period".to_string(), "monthly".to_string())]
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(404, &json!({ "error": "Article not found" })), "Article not found");
        assert_eq!(error_message(502, &json!("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message(500, &Value::Null), "Request failed with status 500");
    }
}
