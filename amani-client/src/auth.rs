//! Auth endpoints: registration submission, status lookup, login

use amani_core::dto::auth::{LoginRequest, RegisterRequest};

use crate::error::Result;
use crate::{ApiResponse, PortalClient};

impl PortalClient {
    // =============================================================================
    // Registration
    // =============================================================================

    /// Submit a membership registration
    ///
    /// # Arguments
    /// * `req` - The registration payload
    ///
    /// # Returns
    /// The raw response; the backend-assigned identifier can be extracted
    /// with `RegistrationResult::from_payload`.
    ///
    /// # Example
    /// ```no_run
    /// # use amani_client::PortalClient;
    /// # use amani_core::dto::auth::RegisterRequest;
    /// # use amani_core::domain::registration::RegistrationResult;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = PortalClient::new("http://127.0.0.1:5000");
    /// let response = client.register(&RegisterRequest {
    ///     full_name: "Test User".to_string(),
    ///     username: "testuser".to_string(),
    ///     phone_number: "+254712345678".to_string(),
    ///     password: "TestPass123!".to_string(),
    ///     email: None,
    /// }).await?;
    ///
    /// if let Some(registration) = RegistrationResult::from_payload(&response.payload) {
    ///     println!("registration id: {}", registration.registration_id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn register(&self, req: &RegisterRequest) -> Result<ApiResponse> {
        let url = format!("{}/api/auth/register", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        self.read_response(response).await
    }

    /// Submit a registration on the unprefixed fallback route
    ///
    /// Deployments fronted by a static host answer unknown `/api` paths
    /// with an HTML page; `POST /auth/register` reaches those backends.
    pub async fn register_fallback(&self, req: &RegisterRequest) -> Result<ApiResponse> {
        let url = format!("{}/auth/register", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        self.read_response(response).await
    }

    /// Fetch the status of a membership application
    ///
    /// # Arguments
    /// * `registration_id` - The backend-assigned registration identifier
    pub async fn registration_status(&self, registration_id: &str) -> Result<ApiResponse> {
        let url = format!("{}/api/auth/registration/{}", self.base_url, registration_id);
        let response = self.client.get(&url).send().await?;

        self.read_response(response).await
    }

    // =============================================================================
    // Login
    // =============================================================================

    /// Attempt a member login
    ///
    /// A failed login is an ordinary non-2xx response, not an error; the
    /// bearer token, when granted, sits under one of several field names
    /// and is extracted with `extract::bearer_token`.
    pub async fn login(&self, req: &LoginRequest) -> Result<ApiResponse> {
        let url = format!("{}/api/auth/login", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        self.read_response(response).await
    }
}
