use super::{ApiError, HelpdeskClient};
use crate::api::types::{Followup, NewFollowup, NewTicket, Ticket};
use reqwest::Method;

#[allow(async_fn_in_trait)]
pub trait TicketsApi {
    /// Tickets opened by the signed-in client.
    async fn list_my_tickets(&self) -> Result<Vec<Ticket>, ApiError>;

    /// Every ticket visible to a support agent.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, ApiError>;

    async fn get_ticket(&self, ticket_id: i64) -> Result<Ticket, ApiError>;
    async fn get_followups(&self, ticket_id: i64) -> Result<Vec<Followup>, ApiError>;
    async fn add_followup(&self, ticket_id: i64, content: &str) -> Result<Followup, ApiError>;
    async fn create_ticket(&self, name: &str, content: &str) -> Result<Ticket, ApiError>;

    /// Ticket and follow-ups fetched concurrently; fails if either fails.
    async fn fetch_conversation(
        &self,
        ticket_id: i64,
    ) -> Result<(Ticket, Vec<Followup>), ApiError>;
}

impl TicketsApi for HelpdeskClient {
    async fn list_my_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        let request = self.authed(Method::GET, "/api/tickets/me")?;
        self.send_json(request).await
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        let request = self.authed(Method::GET, "/api/tickets")?;
        self.send_json(request).await
    }

    async fn get_ticket(&self, ticket_id: i64) -> Result<Ticket, ApiError> {
        let request = self.authed(Method::GET, &format!("/api/tickets/{ticket_id}"))?;
        self.send_json(request).await
    }

    async fn get_followups(&self, ticket_id: i64) -> Result<Vec<Followup>, ApiError> {
        let request = self.authed(Method::GET, &format!("/api/tickets/{ticket_id}/followups"))?;
        self.send_json(request).await
    }

    async fn add_followup(&self, ticket_id: i64, content: &str) -> Result<Followup, ApiError> {
        let body = NewFollowup {
            content: content.to_string(),
        };
        let request = self
            .authed(Method::POST, &format!("/api/tickets/{ticket_id}/followups"))?
            .json(&body);
        self.send_json(request).await
    }

    async fn create_ticket(&self, name: &str, content: &str) -> Result<Ticket, ApiError> {
        let body = NewTicket {
            name: name.to_string(),
            content: content.to_string(),
        };
        let request = self.authed(Method::POST, "/api/tickets")?.json(&body);
        self.send_json(request).await
    }

    async fn fetch_conversation(
        &self,
        ticket_id: i64,
    ) -> Result<(Ticket, Vec<Followup>), ApiError> {
        tokio::try_join!(self.get_ticket(ticket_id), self.get_followups(ticket_id))
    }
}
