//! HTTP client for the json-server style catalog API.

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::CatalogSource;
use crate::config::SproutConfig;
use crate::error::{Error, Result};
use crate::models::{Environment, Plant, PlantId};
use crate::util::compact_text;

const PLANTS_RESOURCE: &str = "plants";
const ENVIRONMENTS_RESOURCE: &str = "plants_environments";

/// Catalog client backed by `reqwest`
#[derive(Clone)]
pub struct HttpCatalogClient {
    base_url: String,
    base: Url,
    client: reqwest::Client,
}

impl HttpCatalogClient {
    pub fn new(config: &SproutConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|error| Error::Config(format!("invalid api_base_url '{base_url}': {error}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "api_base_url '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self {
            base_url,
            base,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment
    fn resource_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_text(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<(StatusCode, String)> {
        let url = self.resource_url(segments);
        tracing::debug!(%url, ?query, "catalog request");

        let response = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn get_records<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let (status, body) = self.get_text(&[resource], query).await?;
        if !status.is_success() {
            return Err(Error::Network(parse_api_error(status, &body)));
        }
        parse_records(&body)
    }
}

impl CatalogSource for HttpCatalogClient {
    async fn fetch_plants(&self, page: u32, page_size: u32) -> Result<Vec<Plant>> {
        let plants = self
            .get_records(PLANTS_RESOURCE, &plants_query(page, page_size))
            .await?;
        tracing::debug!(page, count = plants.len(), "fetched catalog page");
        Ok(plants)
    }

    async fn fetch_environments(&self) -> Result<Vec<Environment>> {
        self.get_records(ENVIRONMENTS_RESOURCE, &environments_query())
            .await
    }

    async fn fetch_plant(&self, id: &PlantId) -> Result<Plant> {
        let (status, body) = self
            .get_text(&[PLANTS_RESOURCE, id.as_str()], &[])
            .await?;

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(Error::Network(parse_api_error(status, &body)));
        }
        serde_json::from_str(&body)
            .map_err(|error| Error::Network(format!("malformed plant payload: {error}")))
    }
}

/// Query parameters for one catalog page
pub fn plants_query(page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("_sort", "name".to_string()),
        ("_order", "asc".to_string()),
        ("_page", page.to_string()),
        ("_limit", page_size.to_string()),
    ]
}

/// Query parameters for the environment list
pub fn environments_query() -> Vec<(&'static str, String)> {
    vec![
        ("_sort", "title".to_string()),
        ("_order", "asc".to_string()),
    ]
}

/// Decode a list response; an empty or `null` body is an empty list.
pub fn parse_records<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Option<Vec<T>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|error| Error::Network(format!("malformed catalog payload: {error}")))
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}
