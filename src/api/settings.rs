use super::{ApiError, HelpdeskClient};
use crate::api::types::{GlpiConfig, MiddlewareConfig};
use reqwest::Method;

#[allow(async_fn_in_trait)]
pub trait SettingsApi {
    async fn get_middleware_config(&self) -> Result<MiddlewareConfig, ApiError>;
    async fn update_middleware_config(
        &self,
        config: &MiddlewareConfig,
    ) -> Result<MiddlewareConfig, ApiError>;

    async fn get_glpi_config(&self) -> Result<GlpiConfig, ApiError>;
    async fn update_glpi_config(&self, config: &GlpiConfig) -> Result<(), ApiError>;
}

impl SettingsApi for HelpdeskClient {
    async fn get_middleware_config(&self) -> Result<MiddlewareConfig, ApiError> {
        let request = self.authed(Method::GET, "/api/admin/middleware")?;
        self.send_json(request).await
    }

    async fn update_middleware_config(
        &self,
        config: &MiddlewareConfig,
    ) -> Result<MiddlewareConfig, ApiError> {
        let request = self
            .authed(Method::PUT, "/api/admin/middleware")?
            .json(config);
        self.send_json(request).await
    }

    async fn get_glpi_config(&self) -> Result<GlpiConfig, ApiError> {
        let request = self.authed(Method::GET, "/api/admin/glpi")?;
        self.send_json(request).await
    }

    async fn update_glpi_config(&self, config: &GlpiConfig) -> Result<(), ApiError> {
        let request = self.authed(Method::PUT, "/api/admin/glpi")?.json(config);
        self.send_empty(request).await
    }
}
