// Wire types shared with the backend

pub mod article;
pub mod reference;
pub mod user;

use serde::{Deserialize, Deserializer};

pub use article::{
    Article, ArticleDetail, ArticleFilter, ArticleId, ArticleKind, ArticleSort,
    BookmarkToggle, NewArticle,
};
pub use reference::{AssistantAnswer, RankingPeriod, Rates};
pub use user::{Credentials, LoginResponse, UserProfile};

/// `{ "data": ... }` wrapper used by most endpoints
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// `GET /wallet/balance` response
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct BalanceResponse {
    pub balance: f64,
}

/// The backend encodes empty Go slices and maps as `null`; read those as empty
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
