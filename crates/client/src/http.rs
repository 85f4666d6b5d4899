//! `SalesApi` over HTTP (reqwest).

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use storedesk_core::SaleId;
use storedesk_products::ProductRecord;
use storedesk_sales::{SalePayload, SaleSummary, sort_newest_first};

use crate::api::{SaleReceipt, SalesApi};
use crate::config::ApiConfig;
use crate::error::ApiError;

const CATALOG_PATH: &[&str] = &["produk", "getallproduk"];
const CREATE_SALE_PATH: &[&str] = &["penjualan", "create"];
const LIST_SALES_PATH: &[&str] = &["penjualan", "getall"];
const GET_SALE_PATH: &[&str] = &["penjualan", "by-id"];
const DELETE_SALE_PATH: &[&str] = &["penjualan", "delete"];

/// Longest slice of a non-JSON error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Response envelope used by every endpoint: `{ "message": ..., "data": ... }`.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the dashboard backend.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpSalesApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpSalesApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.config.base_url.clone();
        // http(s) URLs always have path segments; checked when the config was built.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `segments` followed by `id` as its own, percent-encoded segment.
    fn record_endpoint(&self, segments: &[&str], id: &SaleId) -> Url {
        let mut url = self.endpoint(segments);
        if let Ok(mut path) = url.path_segments_mut() {
            path.push(id.as_str());
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.config.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send and apply the success contract: 2xx yields the body text, any
    /// other status becomes `ApiError::Api`.
    async fn send(&self, req: RequestBuilder) -> Result<String, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(status, &body);
        tracing::warn!(status = status.as_u16(), %message, "API request failed");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        if let Some(msg) = envelope.message.or(envelope.error) {
            return msg;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

/// Decode `data` as a list. `null`/missing is an empty list; rows that do not
/// decode are skipped.
fn decode_rows<T: DeserializeOwned>(body: &str, what: &'static str) -> Result<Vec<T>, ApiError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| ApiError::Parse(format!("{what}: {e}")))?;

    let rows = match envelope.data {
        Value::Null => return Ok(Vec::new()),
        Value::Array(rows) => rows,
        other => {
            return Err(ApiError::Parse(format!(
                "{what}: expected a list, got {}",
                json_kind(&other)
            )));
        }
    };

    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(error = %e, what, "skipping malformed row");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::debug!(what, total, kept = decoded.len(), "rows skipped");
    }
    Ok(decoded)
}

/// Decode `data` as a single record. A one-element list is accepted; `null`,
/// an empty list or a record that does not decode is a parse error.
fn decode_record<T: DeserializeOwned>(body: &str, what: &'static str) -> Result<T, ApiError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(format!("{what}: {e}")))?;

    let record = match envelope.data {
        Value::Array(rows) => rows.into_iter().next().unwrap_or(Value::Null),
        other => other,
    };
    if !record.is_object() {
        return Err(ApiError::Parse(format!(
            "{what}: expected a record, got {}",
            json_kind(&record)
        )));
    }
    serde_json::from_value(record).map_err(|e| ApiError::Parse(format!("{what}: {e}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Pull a sale id out of a create response's `data`: a string, an object with
/// `id_penjualan`/`id`/`saleId`, or the first element of a list of those.
fn sale_id_from(data: &Value) -> Option<SaleId> {
    match data {
        Value::String(s) => SaleId::new(s.as_str()).ok(),
        Value::Array(items) => items.first().and_then(sale_id_from),
        Value::Object(map) => ["id_penjualan", "id", "saleId"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .and_then(|s| SaleId::new(s).ok()),
        _ => None,
    }
}

impl SalesApi for HttpSalesApi {
    async fn fetch_catalog(&self) -> Result<Vec<ProductRecord>, ApiError> {
        let req = self.request(Method::GET, self.endpoint(CATALOG_PATH));
        let body = self.send(req).await?;
        let records: Vec<ProductRecord> = decode_rows(&body, "catalog")?;
        tracing::debug!(count = records.len(), "catalog fetched");
        Ok(records)
    }

    async fn create_sale(&self, payload: &SalePayload) -> Result<SaleReceipt, ApiError> {
        let req = self
            .request(Method::POST, self.endpoint(CREATE_SALE_PATH))
            .json(payload);
        let body = self.send(req).await?;

        // 2xx is success whatever the body says; the body only adds detail.
        let envelope = serde_json::from_str::<Envelope>(&body).unwrap_or_default();
        let receipt = SaleReceipt {
            id: sale_id_from(&envelope.data),
            message: envelope.message,
        };
        tracing::info!(
            sale_id = receipt.id.as_ref().map(|id| id.as_str()).unwrap_or("-"),
            items = payload.items.len(),
            total = payload.total.amount(),
            "sale created"
        );
        Ok(receipt)
    }

    async fn list_sales(&self) -> Result<Vec<SaleSummary>, ApiError> {
        let req = self.request(Method::GET, self.endpoint(LIST_SALES_PATH));
        let body = self.send(req).await?;
        let mut rows: Vec<SaleSummary> = decode_rows(&body, "sales")?;
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    async fn get_sale(&self, id: &SaleId) -> Result<SaleSummary, ApiError> {
        let req = self.request(Method::GET, self.record_endpoint(GET_SALE_PATH, id));
        let body = self.send(req).await?;
        let sale: SaleSummary = decode_record(&body, "sale")?;
        tracing::debug!(sale_id = %sale.id, items = sale.items.len(), "sale fetched");
        Ok(sale)
    }

    async fn delete_sale(&self, id: &SaleId) -> Result<(), ApiError> {
        let url = self.record_endpoint(DELETE_SALE_PATH, id);
        self.send(self.request(Method::DELETE, url)).await?;
        tracing::info!(sale_id = %id, "sale deleted");
        Ok(())
    }
}
