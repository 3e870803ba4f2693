//! Champion endpoints

use amani_core::dto::champion::ChampionSignup;

use crate::error::Result;
use crate::{ApiResponse, PortalClient};

impl PortalClient {
    /// Submit a champion self-signup
    ///
    /// The smoke flows use this as a secondary health probe; callers
    /// tolerate any outcome, including transport failure.
    pub async fn champion_signup(&self, req: &ChampionSignup) -> Result<ApiResponse> {
        let url = format!("{}/api/champions/register", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        self.read_response(response).await
    }
}
