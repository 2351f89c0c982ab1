use std::cell::RefCell;

use crate::error::ClientError;
use crate::models::AssistantAnswer;
use crate::services::ApiClient;

/// Questions answered from the article corpus (`POST /rag/query`)
pub struct AssistantStore {
    api: ApiClient,
    last_answer: RefCell<Option<AssistantAnswer>>,
}

impl AssistantStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            last_answer: RefCell::new(None),
        }
    }

    pub fn last_answer(&self) -> Option<AssistantAnswer> {
        self.last_answer.borrow().clone()
    }

    pub async fn ask(&self, question: &str) -> Result<AssistantAnswer, ClientError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ClientError::InvalidInput("Question is empty".to_string()));
        }

        let answer = self.api.ask(question).await.map_err(|e| {
            log::error!("Assistant query failed: {}", e);
            e
        })?;

        if let Some(total) = answer.total_seconds() {
            log::info!("Assistant answered in {:.2}s", total);
        }
        *self.last_answer.borrow_mut() = Some(answer.clone());
        Ok(answer)
    }

    pub fn clear(&self) {
        *self.last_answer.borrow_mut() = None;
    }
}
