//! Minimal GraphQL client
use std::collections::HashMap;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::errors::{ReleaseCheckerError, ReleaseCheckerErrorKind};

/// User agent sent with every request, GitHub rejects requests without one
const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Body of a GraphQL request
#[derive(Serialize, Debug)]
struct GraphqlRequest<'a> {
    /// GraphQL document
    query: &'a str,

    /// Variables of the document
    variables: &'a Map<String, Value>,
}

/// Body of a GraphQL response
#[derive(Deserialize, Debug)]
struct GraphqlResponse {
    /// Payload
    #[serde(default)]
    data: Option<Value>,

    /// Errors reported by the server
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

/// One GraphQL error
#[derive(Deserialize, Debug)]
struct GraphqlError {
    /// Error message
    message: String,
}

/// Client bound to one GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    /// Endpoint the queries are sent to
    endpoint: Url,

    /// Reqwest client
    client: reqwest::Client,
}

impl GraphqlClient {
    /// Create a client for `endpoint`
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint of the client
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `query` and return the `data` member of the response as JSON text
    /// # Errors
    /// Error on transport failure, non-success status, malformed body or GraphQL errors
    pub async fn query(
        &self,
        query: &str,
        variables: &Map<String, Value>,
        headers: &HashMap<String, String>,
    ) -> Result<String, ReleaseCheckerError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .json(&GraphqlRequest { query, variables });
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        log::debug!("POST {}", self.endpoint);
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ReleaseCheckerError::new(ReleaseCheckerErrorKind::Query)
                .with_text(&format!("{status} - {text}")));
        }
        let body: GraphqlResponse = serde_json::from_str(&text)?;
        match body.errors {
            Some(errors) if !errors.is_empty() => {
                let messages = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(ReleaseCheckerError::new(ReleaseCheckerErrorKind::GraphQl).with_text(&messages))
            }
            _ => Ok(body.data.unwrap_or(Value::Null).to_string()),
        }
    }
}
