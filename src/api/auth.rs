use super::{ApiError, HelpdeskClient};
use crate::api::types::LoginResponse;

#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
}

impl AuthApi for HelpdeskClient {
    /// OAuth2 password form: the email goes in the `username` field.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let params = [("username", email), ("password", password)];

        let request = self
            .client
            .post(self.url("/api/auth/login"))
            .form(&params);

        self.send_json(request).await
    }
}
