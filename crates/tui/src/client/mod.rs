use api_types::{EntryId, FinancialEntry, FinancialEntryNew};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::error::{AppError, Result};

const ENTRIES_PATH: &str = "financialEntries";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("entry not found")]
    NotFound,
    #[error("rejected by server: {0}")]
    Validation(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// REST client for the `financialEntries` collection.
///
/// Requests are never retried; the caller decides what to show on failure.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|err| AppError::InvalidUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidUrl(format!("{base_url} cannot be a base")));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("fintrack/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { base_url, http })
    }

    /// `GET /financialEntries`
    pub async fn list_entries(&self) -> std::result::Result<Vec<FinancialEntry>, ClientError> {
        let endpoint = self.entries_url(None)?;
        tracing::debug!(%endpoint, "fetching entries");

        let res = self.http.get(endpoint).send().await?;
        let res = check(res).await?;
        let entries = res.json::<Vec<FinancialEntry>>().await?;
        tracing::debug!(count = entries.len(), "entries fetched");
        Ok(entries)
    }

    /// `POST /financialEntries`, returning the record as stored.
    pub async fn create_entry(
        &self,
        entry: &FinancialEntryNew,
    ) -> std::result::Result<FinancialEntry, ClientError> {
        let endpoint = self.entries_url(None)?;
        tracing::debug!(%endpoint, "creating entry");

        let res = self.http.post(endpoint).json(entry).send().await?;
        let res = check(res).await?;
        let created = res.json::<FinancialEntry>().await?;
        tracing::info!(id = %created.id, "entry created");
        Ok(created)
    }

    /// `PUT /financialEntries/{id}` with the full record.
    pub async fn update_entry(&self, entry: &FinancialEntry) -> std::result::Result<(), ClientError> {
        let endpoint = self.entries_url(Some(&entry.id))?;
        tracing::debug!(%endpoint, "updating entry");

        let res = self.http.put(endpoint).json(entry).send().await?;
        check(res).await?;
        tracing::info!(id = %entry.id, "entry updated");
        Ok(())
    }

    /// `DELETE /financialEntries/{id}`
    pub async fn delete_entry(&self, id: &EntryId) -> std::result::Result<(), ClientError> {
        let endpoint = self.entries_url(Some(id))?;
        tracing::debug!(%endpoint, "deleting entry");

        let res = self.http.delete(endpoint).send().await?;
        check(res).await?;
        tracing::info!(%id, "entry deleted");
        Ok(())
    }

    fn entries_url(&self, id: Option<&EntryId>) -> std::result::Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(ENTRIES_PATH);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }
}

async fn check(res: Response) -> std::result::Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
    tracing::warn!(status = status.as_u16(), %message, "request failed");

    let err = match status {
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    };
    Err(err)
}

#[cfg(test)]
mod tests {
    use api_types::{Category, EntryStatus, PaymentMethod};
    use axum::http::Method;
    use serde_json::json;

    use super::*;
    use crate::testing::{FakeBackend, entry};

    #[test]
    fn entries_url_keeps_base_path() {
        let client = Client::new("http://localhost:4000").unwrap();
        assert_eq!(
            client.entries_url(None).unwrap().as_str(),
            "http://localhost:4000/financialEntries"
        );

        let prefixed = Client::new("http://localhost:4000/api").unwrap();
        assert_eq!(
            prefixed
                .entries_url(Some(&EntryId::Number(3)))
                .unwrap()
                .as_str(),
            "http://localhost:4000/api/financialEntries/3"
        );
    }

    #[test]
    fn entry_ids_are_escaped() {
        let client = Client::new("http://localhost:4000/").unwrap();
        let url = client
            .entries_url(Some(&EntryId::Text("a/b c".to_string())))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/financialEntries/a%2Fb%20c");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(Client::new("mailto:someone@example.com").is_err());
        assert!(Client::new("not a url").is_err());
    }

    #[tokio::test]
    async fn lists_entries() {
        let backend = FakeBackend::start(vec![
            entry(json!({ "id": 1, "amount": 10, "category": "Rent" })),
            entry(json!({ "id": 2, "amount": "oops" })),
        ])
        .await;
        let client = Client::new(backend.url()).unwrap();

        let entries = client.list_entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].amount_value(), 0.0);
    }

    #[tokio::test]
    async fn creates_entry_without_id() {
        let backend = FakeBackend::start(Vec::new()).await;
        let client = Client::new(backend.url()).unwrap();

        let created = client
            .create_entry(&FinancialEntryNew {
                amount: 42.0,
                description: "Groceries".to_string(),
                date: "2024-06-01".to_string(),
                category: Category::Groceries,
                payment_method: PaymentMethod::Cash,
                notes: String::new(),
                status: EntryStatus::Pending,
            })
            .await
            .unwrap();

        assert_eq!(created.id, EntryId::Number(1));
        let requests = backend.requests();
        assert_eq!(requests[0].method, Method::POST);
        let body = requests[0].body.as_ref().unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["paymentMethod"], json!("Cash"));
    }

    #[tokio::test]
    async fn update_puts_the_full_record() {
        let stored = entry(json!({
            "id": 5,
            "amount": 9.5,
            "date": "2024-02-02",
            "description": "Coffee",
            "category": "Entertainment",
            "paymentMethod": "Credit Card",
            "status": "Pending",
            "notes": "with Sam"
        }));
        let backend = FakeBackend::start(vec![stored.clone()]).await;
        let client = Client::new(backend.url()).unwrap();

        client.update_entry(&stored).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/financialEntries/5");
        assert_eq!(
            requests[0].body.as_ref().unwrap(),
            &serde_json::to_value(&stored).unwrap()
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_entry_is_not_found() {
        let backend = FakeBackend::start(Vec::new()).await;
        let client = Client::new(backend.url()).unwrap();

        let err = client.delete_entry(&EntryId::Number(99)).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }

    #[tokio::test]
    async fn server_failures_carry_status() {
        let backend = FakeBackend::start(Vec::new()).await;
        backend.fail_requests(true);
        let client = Client::new(backend.url()).unwrap();

        let err = client.list_entries().await.unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 500, .. }));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = Client::new(&format!("http://{addr}")).unwrap();

        let err = client.list_entries().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
