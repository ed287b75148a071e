//! HTTP client for the product API.
//!
//! Every operation is a GraphQL document POSTed to a single endpoint. The
//! client applies optional Bearer auth, unwraps the `{data, errors}` envelope,
//! and implements the `ProductApi` and `PortfolioApi` collaborator traits.

pub mod api;

use anyhow::{Context, Result};
use productdesk_core::ClientConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: &'a V,
}

/// GraphQL client for the product API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.graphql_url(),
            token: config.api_token.clone(),
        })
    }

    /// Create client from environment, see [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Failed to load client configuration")?;
        Self::new(&config)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Execute a query or mutation and deserialize its `data` field.
    pub async fn execute<T: DeserializeOwned, V: Serialize>(
        &self,
        query: &str,
        variables: &V,
    ) -> Result<T> {
        let body = GraphqlRequest { query, variables };
        let request = self.client.post(&self.endpoint).json(&body);
        let request = self.apply_auth(request);

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let envelope: GraphqlEnvelope<T> = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        match envelope.data {
            Some(data) => {
                if !envelope.errors.is_empty() {
                    tracing::warn!(
                        errors = ?envelope.errors,
                        "GraphQL response carried partial errors"
                    );
                }
                Ok(data)
            }
            None => {
                let messages: Vec<&str> =
                    envelope.errors.iter().map(|e| e.message.as_str()).collect();
                Err(anyhow::anyhow!(
                    "GraphQL request returned no data: {}",
                    if messages.is_empty() {
                        "empty response".to_string()
                    } else {
                        messages.join("; ")
                    }
                ))
            }
        }
    }
}
