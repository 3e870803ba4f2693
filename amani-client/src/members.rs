//! Member endpoints

use crate::error::Result;
use crate::{ApiResponse, PortalClient};

impl PortalClient {
    /// Fetch the member profile for a bearer token
    ///
    /// # Arguments
    /// * `token` - Bearer token obtained from a successful login
    pub async fn fetch_profile(&self, token: &str) -> Result<ApiResponse> {
        let url = format!("{}/api/members/me", self.base_url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        self.read_response(response).await
    }
}
