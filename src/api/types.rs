use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Superadmin,
    AgentSupport,
    AgentInterne,
    Client,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub const ASSIGNABLE: [Role; 5] = [
        Role::Client,
        Role::Admin,
        Role::Superadmin,
        Role::AgentSupport,
        Role::AgentInterne,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Superadmin => "Super Admin",
            Role::AgentSupport => "Agent Support",
            Role::AgentInterne => "Agent Interne",
            Role::Client => "Client",
            Role::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    #[default]
    Pending,
    Rejected,
    Blocked,
}

impl UserStatus {
    pub const ALL: [UserStatus; 4] = [
        UserStatus::Active,
        UserStatus::Pending,
        UserStatus::Rejected,
        UserStatus::Blocked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Pending => "Pending",
            UserStatus::Rejected => "Rejected",
            UserStatus::Blocked => "Blocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

/// Body for both user creation and update. Fields left `None` are not sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

/// Ticket status as the ticketing backend encodes it (numeric code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TicketStatus {
    New,
    Assigned,
    Planned,
    Pending,
    Solved,
    Closed,
    Other(u8),
}

impl From<u8> for TicketStatus {
    fn from(code: u8) -> Self {
        match code {
            1 => TicketStatus::New,
            2 => TicketStatus::Assigned,
            3 => TicketStatus::Planned,
            4 => TicketStatus::Pending,
            5 => TicketStatus::Solved,
            6 => TicketStatus::Closed,
            other => TicketStatus::Other(other),
        }
    }
}

impl From<TicketStatus> for u8 {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::New => 1,
            TicketStatus::Assigned => 2,
            TicketStatus::Planned => 3,
            TicketStatus::Pending => 4,
            TicketStatus::Solved => 5,
            TicketStatus::Closed => 6,
            TicketStatus::Other(code) => code,
        }
    }
}

impl TicketStatus {
    pub fn label(&self) -> String {
        match self {
            TicketStatus::New => "New".to_string(),
            TicketStatus::Assigned => "In progress (assigned)".to_string(),
            TicketStatus::Planned => "In progress (planned)".to_string(),
            TicketStatus::Pending => "Pending".to_string(),
            TicketStatus::Solved => "Solved".to_string(),
            TicketStatus::Closed => "Closed".to_string(),
            TicketStatus::Other(code) => format!("Status {code}"),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, TicketStatus::Solved | TicketStatus::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    #[serde(alias = "title")]
    pub name: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "email")]
    pub requester_email: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followup {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub date_creation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTicket {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFollowup {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(alias = "name", alias = "filename")]
    pub title: String,
    #[serde(default, alias = "created_at")]
    pub uploaded_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    pub fn next(self) -> Self {
        match self {
            LogLevel::Debug => LogLevel::Info,
            LogLevel::Info => LogLevel::Warning,
            LogLevel::Warning => LogLevel::Error,
            LogLevel::Error => LogLevel::Critical,
            LogLevel::Critical => LogLevel::Debug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    pub log_level: LogLevel,
    pub waf_enabled: bool,
    pub rate_limiting_enabled: bool,
    pub maintenance_mode: bool,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            waf_enabled: false,
            rate_limiting_enabled: true,
            maintenance_mode: false,
        }
    }
}

pub const DEFAULT_GLPI_URL: &str = "http://localhost:8080/apirest.php/";

/// Connection settings of the ticketing backend. Tokens are write-only: the
/// server never returns them and a `None` leaves the stored value unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlpiConfig {
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
}

impl Default for GlpiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GLPI_URL.to_string(),
            app_token: None,
            user_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub day: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AgentStats {
    pub tickets_received: u64,
    pub recurring_problems: u64,
    pub automatic_reports: u64,
    #[serde(default)]
    pub daily_volume: Vec<DailyVolume>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub ticket_id: i64,
    pub summary: String,
}
