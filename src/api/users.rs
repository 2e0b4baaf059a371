use super::{ApiError, HelpdeskClient};
use crate::api::types::{User, UserPayload};
use reqwest::Method;

#[allow(async_fn_in_trait)]
pub trait UsersApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
    async fn create_user(&self, payload: &UserPayload) -> Result<User, ApiError>;
    async fn update_user(&self, user_id: i64, payload: &UserPayload) -> Result<User, ApiError>;
    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError>;
}

impl UsersApi for HelpdeskClient {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let request = self.authed(Method::GET, "/api/admin/users")?;
        self.send_json(request).await
    }

    async fn create_user(&self, payload: &UserPayload) -> Result<User, ApiError> {
        let request = self.authed(Method::POST, "/api/admin/users")?.json(payload);
        self.send_json(request).await
    }

    async fn update_user(&self, user_id: i64, payload: &UserPayload) -> Result<User, ApiError> {
        let request = self
            .authed(Method::PUT, &format!("/api/admin/users/{user_id}"))?
            .json(payload);
        self.send_json(request).await
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        let request = self.authed(Method::DELETE, &format!("/api/admin/users/{user_id}"))?;
        self.send_empty(request).await
    }
}
