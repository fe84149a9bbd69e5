use std::time::Duration;

use reel_core::config;
use reel_core::error::CoreError;

/// Default Appwrite Cloud endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://fra.cloud.appwrite.io/v1";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Location of the search-count collection in the document store.
#[derive(Clone)]
pub struct StoreConfig {
    /// REST endpoint without a trailing slash.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    /// Server API key; browser-style sessions leave this unset and rely
    /// on the collection's permissions.
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("database_id", &self.database_id)
            .field("collection_id", &self.collection_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Load store configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default                            |
    /// |-----------------------------|----------|------------------------------------|
    /// | `APPWRITE_PROJECT_ID`       | **yes**  | --                                 |
    /// | `APPWRITE_DATABASE_ID`      | **yes**  | --                                 |
    /// | `APPWRITE_COLLECTION_ID`    | **yes**  | --                                 |
    /// | `APPWRITE_ENDPOINT`         | no       | `https://fra.cloud.appwrite.io/v1` |
    /// | `APPWRITE_API_KEY`          | no       | --                                 |
    /// | `REEL_REQUEST_TIMEOUT_SECS` | no       | `10`                               |
    pub fn from_env() -> Result<Self, CoreError> {
        let project_id = config::required("APPWRITE_PROJECT_ID")?;
        let database_id = config::required("APPWRITE_DATABASE_ID")?;
        let collection_id = config::required("APPWRITE_COLLECTION_ID")?;
        let endpoint = config::or_default("APPWRITE_ENDPOINT", DEFAULT_ENDPOINT)
            .trim_end_matches('/')
            .to_string();
        let api_key = config::optional("APPWRITE_API_KEY");
        let timeout_secs =
            config::parsed_or("REEL_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            endpoint,
            project_id,
            database_id,
            collection_id,
            api_key,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// `{endpoint}/databases/{db}/collections/{collection}/documents`
    pub fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }
}
