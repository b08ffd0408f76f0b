//! HTTP gateway to the tax-filing backend.
//!
//! Implements the widget layer's [`YearSource`] and [`CompanyGateway`]
//! traits over the backend's AJAX endpoints. Requests carry the
//! `X-Requested-With: XMLHttpRequest` header the views key content
//! negotiation on. Year endpoints return a bare JSON array of years —
//! strings or numbers depending on the serializer — which is normalized to
//! decimal strings here so the widget layer only ever sees strings.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use taxui_widgets::{CompanyGateway, CompanyOutcome, FormFlavor, YearSource};

const REQUESTED_WITH: &str = "X-Requested-With";
const XML_HTTP_REQUEST: &str = "XMLHttpRequest";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the network boundary
#[derive(Error, Debug)]
pub enum NetError {
    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The request never completed
    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// The response body was not what the contract promises
    #[error("unexpected response payload: {context}")]
    Decode { context: String },
}

impl NetError {
    fn decode(context: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
        }
    }
}

/// Year entries arrive as strings or numbers; anything else is a broken
/// contract.
fn normalize_year(value: Value) -> Result<String, NetError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(NetError::decode(format!("unexpected year entry: {other}"))),
    }
}

#[derive(Debug, Deserialize)]
struct CompanyResponse {
    success: bool,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Gateway over a single backend base URL, sharing one pooled client.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, NetError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_years(
        &self,
        flavor: FormFlavor,
        association_id: &str,
    ) -> Result<Vec<String>, NetError> {
        let url = format!(
            "{}{}?association_id={association_id}",
            self.base_url,
            flavor.path()
        );
        debug!(%url, "fetching tax years");

        let response = self
            .client
            .get(&url)
            .header(REQUESTED_WITH, XML_HTTP_REQUEST)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let entries: Vec<Value> = response
            .json()
            .await
            .map_err(|e| NetError::decode(e.to_string()))?;
        entries.into_iter().map(normalize_year).collect()
    }

    async fn post_company(
        &self,
        fields: &[(String, String)],
    ) -> Result<CompanyOutcome, NetError> {
        let url = format!("{}/management-companies/create/", self.base_url);
        debug!(%url, "creating management company");

        let mut form = multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }

        let response = self
            .client
            .post(&url)
            .header(REQUESTED_WITH, XML_HTTP_REQUEST)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let payload: CompanyResponse = response
            .json()
            .await
            .map_err(|e| NetError::decode(e.to_string()))?;
        if payload.success {
            let id = match payload.id {
                Some(id) => normalize_year(id)?,
                None => return Err(NetError::decode("success response without an id")),
            };
            let name = payload
                .name
                .ok_or_else(|| NetError::decode("success response without a name"))?;
            Ok(CompanyOutcome::Created { id, name })
        } else {
            Ok(CompanyOutcome::Rejected {
                message: payload
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }
}

#[async_trait]
impl YearSource for HttpGateway {
    async fn tax_years(
        &self,
        flavor: FormFlavor,
        association_id: &str,
    ) -> anyhow::Result<Vec<String>> {
        Ok(self.get_years(flavor, association_id).await?)
    }
}

#[async_trait]
impl CompanyGateway for HttpGateway {
    async fn create_company(&self, fields: &[(String, String)]) -> anyhow::Result<CompanyOutcome> {
        Ok(self.post_company(fields).await?)
    }
}
