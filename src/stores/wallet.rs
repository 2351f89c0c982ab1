use std::cell::Cell;

use crate::error::ClientError;
use crate::models::ArticleId;
use crate::services::ApiClient;
use crate::stores::Refresh;

/// Wallet balance.
///
/// The balance is a copy of the backend's value and is never adjusted locally:
/// every mutation is followed by a fresh `GET /wallet/balance`.
pub struct WalletStore {
    api: ApiClient,
    balance: Cell<f64>,
}

impl WalletStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            balance: Cell::new(0.0),
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance.get()
    }

    pub async fn fetch_balance(&self) -> Refresh {
        match self.reload_balance().await {
            Ok(_) => Refresh::Updated,
            Err(e) => {
                log::error!("Fetch balance failed: {}", e);
                Refresh::Kept
            }
        }
    }

    /// Deposit `amount` (as typed by the user) and reload the balance.
    ///
    /// Errors from either the deposit or the reload are returned.
    pub async fn deposit(&self, amount: &str) -> Result<(), ClientError> {
        let amount = parse_amount(amount)?;
        log::info!("Depositing {}", amount);

        self.api.deposit(amount).await.map_err(|e| {
            log::error!("Deposit failed: {}", e);
            e
        })?;
        self.reload_balance().await?;
        Ok(())
    }

    /// Buy access to a paid article and reload the balance
    pub async fn purchase_article(&self, article_id: ArticleId) -> Result<(), ClientError> {
        log::info!("Purchasing article {}", article_id);

        self.api.purchase_article(article_id).await.map_err(|e| {
            log::error!("Purchase of article {} failed: {}", article_id, e);
            e
        })?;
        self.reload_balance().await?;
        Ok(())
    }

    async fn reload_balance(&self) -> Result<f64, ClientError> {
        let balance = self.api.balance().await?;
        self.balance.set(balance);
        Ok(balance)
    }
}

/// Parse a user-entered amount into the number sent to the backend
pub fn parse_amount(input: &str) -> Result<f64, ClientError> {
    let trimmed = input.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ClientError::InvalidInput(format!("'{}' is not a number", trimmed)))?;

    if !amount.is_finite() {
        return Err(ClientError::InvalidInput(format!("'{}' is not a finite amount", trimmed)));
    }
    Ok(amount)
}
