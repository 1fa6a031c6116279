use std::sync::Arc;

use crate::models::ApiKey;
use crate::store::DocumentStore;

/// Resolves an `Authorization` header value to the api key record it names.
pub struct AuthGate {
    store: Arc<DocumentStore>,
}

impl AuthGate {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    // A header without the "Bearer " prefix is treated as the bare key value.
    pub async fn resolve(&self, header: Option<&str>) -> Option<ApiKey> {
        let header = header?;
        let api_key = header.strip_prefix("Bearer ").unwrap_or(header);
        self.store.find_api_key(|key| key.api_key == api_key).await
    }
}
