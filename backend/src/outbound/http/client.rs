//! Shared reqwest client for the remote document store.
//!
//! The store speaks a small collection-oriented REST dialect:
//!
//! - `GET /v1/{collection}` lists documents, with optional
//!   `field`/`equals` equality filtering and `order_by`/`direction`/`limit`
//!   for recency queries;
//! - `GET|PUT|PATCH|DELETE /v1/{collection}/{id}` operate on one document;
//! - `POST /v1/{collection}` inserts with a store-assigned id;
//! - `DELETE /v1/{collection}?field=...&equals=...` removes every match in
//!   one request and reports the count.
//!
//! This client owns transport details only: URL assembly, timeouts, status
//! mapping, and JSON decoding. Adapters translate [`StoreError`] into their
//! port error types; no business logic lives here.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Transport-level failure raised by [`DocumentStoreClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("document store unreachable: {message}")]
    Connection {
        /// Underlying transport failure description.
        message: String,
    },
    /// The store answered with a non-success status.
    #[error("document store returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("document store response undecodable: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },
}

impl StoreError {
    /// True when the failure was a 404 on a single-document path.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::Status { status, .. } if *status == StatusCode::NOT_FOUND.as_u16()
        )
    }
}

/// One stored document: its id plus the flat field map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEnvelope {
    /// Store-assigned document id.
    pub id: String,
    /// Flat field map.
    #[serde(flatten)]
    pub fields: Value,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    documents: Vec<DocumentEnvelope>,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    deleted: u64,
}

/// Equality filter for list and batch-delete requests.
#[derive(Debug, Clone, Copy)]
pub struct FieldFilter<'a> {
    /// Field name to compare.
    pub field: &'a str,
    /// Value the field must equal.
    pub equals: &'a str,
}

/// Recency ordering for list requests.
#[derive(Debug, Clone, Copy)]
pub struct RecencyQuery<'a> {
    /// Timestamp field to order by.
    pub order_by: &'a str,
    /// Cap on the number of returned documents.
    pub limit: Option<usize>,
}

/// Reqwest-backed client for the document store dialect above.
#[derive(Debug, Clone)]
pub struct DocumentStoreClient {
    client: Client,
    base: Url,
}

impl DocumentStoreClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn collection_url(
        &self,
        collection: &[&str],
        filter: Option<FieldFilter<'_>>,
        recency: Option<RecencyQuery<'_>>,
    ) -> Result<Url, StoreError> {
        let path = format!("v1/{}", collection.join("/"));
        let mut url = self
            .base
            .join(&path)
            .map_err(|err| StoreError::Decode {
                message: err.to_string(),
            })?;
        if filter.is_some() || recency.is_some() {
            let mut pairs = url.query_pairs_mut();
            if let Some(filter) = filter {
                pairs.append_pair("field", filter.field);
                pairs.append_pair("equals", filter.equals);
            }
            if let Some(recency) = recency {
                pairs.append_pair("order_by", recency.order_by);
                pairs.append_pair("direction", "desc");
                if let Some(limit) = recency.limit {
                    pairs.append_pair("limit", &limit.to_string());
                }
            }
        }
        Ok(url)
    }

    fn document_url(&self, collection: &[&str], id: &str) -> Result<Url, StoreError> {
        let path = format!("v1/{}/{id}", collection.join("/"));
        self.base.join(&path).map_err(|err| StoreError::Decode {
            message: err.to_string(),
        })
    }

    /// List a collection, optionally filtered and ordered.
    pub async fn list(
        &self,
        collection: &[&str],
        filter: Option<FieldFilter<'_>>,
        recency: Option<RecencyQuery<'_>>,
    ) -> Result<Vec<DocumentEnvelope>, StoreError> {
        let url = self.collection_url(collection, filter, recency)?;
        let response = self.client.get(url).send().await.map_err(map_transport)?;
        let listed: ListResponse = decode_success(response).await?;
        Ok(listed.documents)
    }

    /// Fetch one document; `None` on 404.
    pub async fn get(
        &self,
        collection: &[&str],
        id: &str,
    ) -> Result<Option<DocumentEnvelope>, StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self.client.get(url).send().await.map_err(map_transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode_success(response).await.map(Some)
    }

    /// Insert a document with a store-assigned id.
    pub async fn insert(
        &self,
        collection: &[&str],
        fields: &Value,
    ) -> Result<DocumentEnvelope, StoreError> {
        let url = self.collection_url(collection, None, None)?;
        let response = self
            .client
            .post(url)
            .json(fields)
            .send()
            .await
            .map_err(map_transport)?;
        decode_success(response).await
    }

    /// Write a document under a caller-chosen key.
    pub async fn put(
        &self,
        collection: &[&str],
        id: &str,
        fields: &Value,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self
            .client
            .put(url)
            .json(fields)
            .send()
            .await
            .map_err(map_transport)?;
        expect_success(response).await
    }

    /// Merge fields into an existing document; 404 surfaces as a status
    /// error callers check with [`StoreError::is_not_found`].
    pub async fn patch(
        &self,
        collection: &[&str],
        id: &str,
        fields: &Value,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self
            .client
            .patch(url)
            .json(fields)
            .send()
            .await
            .map_err(map_transport)?;
        expect_success(response).await
    }

    /// Delete one document; deleting a missing document succeeds.
    pub async fn delete(&self, collection: &[&str], id: &str) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        expect_success(response).await
    }

    /// Delete every document matching the filter, returning the count.
    pub async fn delete_matching(
        &self,
        collection: &[&str],
        filter: FieldFilter<'_>,
    ) -> Result<u64, StoreError> {
        let url = self.collection_url(collection, Some(filter), None)?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport)?;
        let deleted: DeleteResponse = decode_success(response).await?;
        Ok(deleted.deleted)
    }
}

fn map_transport(error: reqwest::Error) -> StoreError {
    StoreError::Connection {
        message: error.to_string(),
    }
}

async fn expect_success(response: Response) -> Result<(), StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message: truncate(&message),
    })
}

async fn decode_success<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport)?;
    if !status.is_success() {
        return Err(StoreError::Status {
            status: status.as_u16(),
            message: truncate(&String::from_utf8_lossy(&body)),
        });
    }
    serde_json::from_slice(&body).map_err(|err| StoreError::Decode {
        message: err.to_string(),
    })
}

fn truncate(message: &str) -> String {
    const MAX: usize = 256;
    if message.len() <= MAX {
        message.to_owned()
    } else {
        let mut cut = MAX;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…", &message[..cut])
    }
}
