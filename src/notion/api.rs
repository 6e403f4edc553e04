use reqwest::Client;
use serde::Deserialize;
use serde_json::{
    json,
    Map,
    Value,
};

use crate::core::{
    tasks::FetchProgress,
    TangochoError,
};

pub const NOTION_VERSION: &str = "2022-06-28";

const API_BASE: &str = "https://api.notion.com/v1";

/// One page object from a database query. Property values stay raw JSON
/// until the dataset builder extracts them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<RawPage>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Clone)]
pub struct NotionClient {
    http: Client,
    token: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self { http: Client::new(), token: token.into() }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, TangochoError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TangochoError::Api { status: status.as_u16(), detail });
        }

        Ok(response.json().await?)
    }

    /// One page of the database query, sorted oldest edit first.
    pub async fn query_page(
        &self,
        database_id: &str,
        cursor: Option<&str>,
    ) -> Result<QueryResponse, TangochoError> {
        let mut body = json!({
            "sorts": [{ "timestamp": "last_edited_time", "direction": "ascending" }]
        });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }

        let url = format!("{}/databases/{}/query", API_BASE, database_id);
        let value = self.send(self.http.post(&url).json(&body)).await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Partial property update of a single page.
    pub async fn update_page(
        &self,
        page_id: &str,
        properties: Map<String, Value>,
    ) -> Result<(), TangochoError> {
        let body = json!({ "properties": properties });

        let url = format!("{}/pages/{}", API_BASE, page_id);
        self.send(self.http.patch(&url).json(&body)).await?;

        Ok(())
    }
}

/// Follows the continuation cursor until the service reports no more pages,
/// reporting cumulative progress after each one. Any failure drops whatever
/// was accumulated so far.
pub async fn fetch_all(
    client: &NotionClient,
    database_id: &str,
    mut progress: impl FnMut(FetchProgress),
) -> Result<Vec<RawPage>, TangochoError> {
    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page_count = 0;

    loop {
        let response = client.query_page(database_id, cursor.as_deref()).await?;

        pages.extend(response.results);
        page_count += 1;
        progress(FetchProgress { pages: page_count, records: pages.len() });

        match (response.has_more, response.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }

    Ok(pages)
}
