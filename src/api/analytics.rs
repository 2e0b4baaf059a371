use super::{ApiError, HelpdeskClient};
use crate::api::types::{AgentStats, TicketSummary};
use reqwest::Method;

#[allow(async_fn_in_trait)]
pub trait AnalyticsApi {
    async fn get_agent_stats(&self, days: u32) -> Result<AgentStats, ApiError>;
    async fn summarize_ticket(&self, ticket_id: i64) -> Result<TicketSummary, ApiError>;
}

impl AnalyticsApi for HelpdeskClient {
    async fn get_agent_stats(&self, days: u32) -> Result<AgentStats, ApiError> {
        let request = self
            .authed(Method::GET, "/api/agent/analytics")?
            .query(&[("days", days)]);
        self.send_json(request).await
    }

    async fn summarize_ticket(&self, ticket_id: i64) -> Result<TicketSummary, ApiError> {
        let request =
            self.authed(Method::POST, &format!("/api/agent/tickets/{ticket_id}/summary"))?;
        self.send_json(request).await
    }
}
