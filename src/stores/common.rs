use std::cell::{Cell, RefCell};

use crate::models::{Article, RankingPeriod, Rates};
use crate::services::ApiClient;
use crate::stores::{next_generation, Refresh};

/// Exchange rates and leaderboard rankings. Both best effort.
pub struct ReferenceStore {
    api: ApiClient,
    rates: RefCell<Rates>,
    rankings: RefCell<Vec<Article>>,
    rankings_generation: Cell<u64>,
}

impl ReferenceStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            rates: RefCell::new(Rates::new()),
            rankings: RefCell::new(Vec::new()),
            rankings_generation: Cell::new(0),
        }
    }

    pub fn rates(&self) -> Rates {
        self.rates.borrow().clone()
    }

    pub fn rankings(&self) -> Vec<Article> {
        self.rankings.borrow().clone()
    }

    /// Convert an amount quoted in the base currency (rate 1.0) into `currency`
    pub fn convert(&self, amount: f64, currency: &str) -> Option<f64> {
        self.rates.borrow().get(currency).map(|rate| amount * rate)
    }

    pub async fn fetch_rates(&self) -> Refresh {
        match self.api.rates().await {
            Ok(rates) => {
                *self.rates.borrow_mut() = rates;
                Refresh::Updated
            }
            Err(e) => {
                log::error!("Fetch rates failed: {}", e);
                Refresh::Kept
            }
        }
    }

    /// Replace the rankings with the leaderboard for `period`.
    /// The period itself is not remembered.
    ///
    /// If another period is requested before this one resolves, this
    /// response is dropped, success or failure.
    pub async fn fetch_rankings(&self, period: RankingPeriod) -> Refresh {
        let generation = next_generation(&self.rankings_generation);
        let result = self.api.rankings(period).await;

        if self.rankings_generation.get() != generation {
            log::debug!("Dropping stale {} rankings response", period);
            return Refresh::Superseded;
        }

        match result {
            Ok(rankings) => {
                log::info!("Loaded {} {} rankings", rankings.len(), period);
                *self.rankings.borrow_mut() = rankings;
                Refresh::Updated
            }
            Err(e) => {
                log::error!("Fetch rankings failed: {}", e);
                Refresh::Kept
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::services::transport::HttpMethod;
    use crate::stores::test_support::api;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_rates_replaces_wholesale() {
        let (api, transport) = api();
        let store = ReferenceStore::new(api);
        transport.respond(HttpMethod::Get, "/rates", 200, json!({ "data": { "USD": 1.0, "BTC": 65000.0 } }));
        transport.respond(HttpMethod::Get, "/rates", 200, json!({ "data": { "EUR": 0.92 } }));

        store.fetch_rates().await;
        assert_eq!(store.rates().len(), 2);

        store.fetch_rates().await;
        let rates = store.rates();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get("EUR"), Some(&0.92));
    }

    #[tokio::test]
    async fn test_fetch_rates_failure_is_swallowed() {
        let (api, transport) = api();
        let store = ReferenceStore::new(api);
        transport.respond(HttpMethod::Get, "/rates", 200, json!({ "data": { "CNY": 7.25 } }));
        transport.fail(HttpMethod::Get, "/rates", ClientError::Network("offline".to_string()));

        store.fetch_rates().await;
        assert_eq!(store.fetch_rates().await, Refresh::Kept);
        assert_eq!(store.convert(2.0, "CNY"), Some(14.5));
        assert_eq!(store.convert(2.0, "JPY"), None);
    }

    #[tokio::test]
    async fn test_rankings_default_period_and_overwrite() {
        let (api, transport) = api();
        let store = ReferenceStore::new(api);
        transport.respond(HttpMethod::Get, "/rankings", 200, json!({ "data": [{ "ID": 1 }, { "ID": 2 }] }));
        transport.respond(HttpMethod::Get, "/rankings", 200, json!({ "data": [{ "ID": 3 }] }));

        store.fetch_rankings(RankingPeriod::default()).await;
        store.fetch_rankings(RankingPeriod::Yearly).await;

        let sent = transport.requests_to(HttpMethod::Get, "/rankings");
        assert_eq!(sent[0].query, vec![("period".to_string(), "daily".to_string())]);
        assert_eq!(sent[1].query, vec![("period".to_string(), "yearly".to_string())]);
        assert_eq!(store.rankings().iter().map(|a| a.id).collect::<Vec<_>>(), vec![3]);
    }

    #[tokio::test]
    async fn test_rankings_failure_keeps_previous() {
        let (api, transport) = api();
        let store = ReferenceStore::new(api);
        transport.respond(HttpMethod::Get, "/rankings", 200, json!({ "data": [{ "ID": 1 }] }));
        transport.respond(HttpMethod::Get, "/rankings", 500, json!({ "error": "redis down" }));

        store.fetch_rankings(RankingPeriod::Daily).await;
        assert_eq!(store.fetch_rankings(RankingPeriod::Monthly).await, Refresh::Kept);
        assert_eq!(store.rankings().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_rankings_dropped() {
        let (api, transport) = api();
        let store = ReferenceStore::new(api);
        let release_daily = transport.hold(HttpMethod::Get, "/rankings");
        transport.respond(HttpMethod::Get, "/rankings", 200, json!({ "data": [{ "ID": 1 }] }));
        transport.respond(HttpMethod::Get, "/rankings", 200, json!({ "data": [{ "ID": 9 }] }));

        let daily = store.fetch_rankings(RankingPeriod::Daily);
        let yearly = async {
            let outcome = store.fetch_rankings(RankingPeriod::Yearly).await;
            let _ = release_daily.send(());
            outcome
        };
        let (daily, yearly) = futures::join!(daily, yearly);

        assert_eq!(yearly, Refresh::Updated);
        assert_eq!(daily, Refresh::Superseded);
        assert_eq!(store.rankings().iter().map(|a| a.id).collect::<Vec<_>>(), vec![9]);
    }
}
