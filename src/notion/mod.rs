pub mod api;
pub mod properties;

use tokio::runtime::Runtime;

pub use api::{
    fetch_all,
    NotionClient,
    QueryResponse,
    RawPage,
};
pub use properties::PropertyPatch;
use crate::{
    config::Settings,
    core::TangochoError,
    quiz::session::RecordStore,
};

/// Builds the configured client, refusing while the settings are incomplete
/// so callers can warn instead of firing doomed requests.
pub fn client_from_settings(settings: &Settings) -> Result<(NotionClient, String), TangochoError> {
    if settings.api_key.trim().is_empty() {
        return Err(TangochoError::ConfigIncomplete("api_key".to_string()));
    }

    let database_id = settings
        .resolved_database_id()
        .ok_or_else(|| TangochoError::ConfigIncomplete("database_id".to_string()))?;

    Ok((NotionClient::new(settings.api_key.trim()), database_id))
}

/// Synchronous write seam over the async client, one blocking round trip
/// per update.
pub struct NotionStore {
    client: NotionClient,
    runtime: Runtime,
}

impl NotionStore {
    pub fn new(client: NotionClient) -> Self {
        let runtime = Runtime::new().expect("Failed to create NotionStore runtime");

        Self { client, runtime }
    }
}

impl RecordStore for NotionStore {
    fn update_properties(
        &self,
        page_id: &str,
        properties: PropertyPatch,
    ) -> Result<(), TangochoError> {
        self.runtime.block_on(self.client.update_page(page_id, properties))
    }
}
