use crate::api::types::Role;

/// Role-specific screen stack a user lands on after signing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    Client,
    Agent,
    Admin,
}

impl Role {
    pub fn console(&self) -> Console {
        match self {
            Role::Admin | Role::Superadmin => Console::Admin,
            Role::AgentSupport => Console::Agent,
            Role::AgentInterne | Role::Client | Role::Unknown => Console::Client,
        }
    }
}
