use api_types::{
    ErrorResponse,
    balance::Balance,
    category::{Category, CategoryNew},
    expense::{Expense, ExpenseId, ExpenseNew, ExpenseUpdate},
};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("rejected: {}", message_or_unknown(.0))]
    Validation(Option<String>),
    #[error("server error: {}", message_or_unknown(.0))]
    Server(Option<String>),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

fn message_or_unknown(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("unknown error")
}

impl ClientError {
    /// Message supplied by the server in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Validation(message) | Self::Server(message) => message.as_deref(),
            Self::NotFound | Self::Transport(_) => None,
        }
    }
}

type ClientResult<T> = std::result::Result<T, ClientError>;

/// Thin wrapper over the expenses REST API.
///
/// Every call is a single request/response cycle: no retries and no timeout
/// beyond whatever the transport imposes.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        // `Url::join` replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("expense_tui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(Some(format!("invalid endpoint {path}: {err}"))))
    }

    pub async fn expenses_list(&self) -> ClientResult<Vec<Expense>> {
        let endpoint = self.endpoint("api/expenses")?;
        tracing::debug!(%endpoint, "listing expenses");
        let res = self.http.get(endpoint).send().await?;
        decode(res).await
    }

    pub async fn expense_create(&self, payload: &ExpenseNew) -> ClientResult<Expense> {
        let endpoint = self.endpoint("api/expenses")?;
        tracing::debug!(%endpoint, name = %payload.name, "creating expense");
        let res = self.http.post(endpoint).json(payload).send().await?;
        decode(res).await
    }

    pub async fn expense_update(&self, id: ExpenseId, payload: &ExpenseUpdate) -> ClientResult<()> {
        let endpoint = self.endpoint(&format!("api/expenses/{id}"))?;
        tracing::debug!(%endpoint, "updating expense");
        let res = self.http.put(endpoint).json(payload).send().await?;
        expect_success(res).await
    }

    pub async fn expense_delete(&self, id: ExpenseId) -> ClientResult<()> {
        let endpoint = self.endpoint(&format!("api/expenses/{id}"))?;
        tracing::debug!(%endpoint, "deleting expense");
        let res = self.http.delete(endpoint).send().await?;
        expect_success(res).await
    }

    pub async fn balance_get(&self) -> ClientResult<Balance> {
        let endpoint = self.endpoint("api/balance")?;
        tracing::debug!(%endpoint, "reading balance");
        let res = self.http.get(endpoint).send().await?;
        decode(res).await
    }

    pub async fn categories_list(&self) -> ClientResult<Vec<Category>> {
        let endpoint = self.endpoint("api/categories")?;
        tracing::debug!(%endpoint, "listing categories");
        let res = self.http.get(endpoint).send().await?;
        decode(res).await
    }

    pub async fn category_create(&self, payload: &CategoryNew) -> ClientResult<Category> {
        let endpoint = self.endpoint("api/categories")?;
        tracing::debug!(%endpoint, name = %payload.name, "creating category");
        let res = self.http.post(endpoint).json(payload).send().await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> ClientResult<T> {
    if res.status().is_success() {
        return res.json::<T>().await.map_err(ClientError::Transport);
    }
    Err(error_for(res).await)
}

async fn expect_success(res: Response) -> ClientResult<()> {
    if res.status().is_success() {
        return Ok(());
    }
    Err(error_for(res).await)
}

async fn error_for(res: Response) -> ClientError {
    let status = res.status();
    let message = res.json::<ErrorResponse>().await.ok().map(|body| body.error);

    match status.as_u16() {
        404 => ClientError::NotFound,
        400 | 409 | 422 => ClientError::Validation(message),
        _ => ClientError::Server(message),
    }
}
