use helpdesk_tui::api::types::{
    GlpiConfig, LogLevel, MiddlewareConfig, QaPair, Role, UserPayload, UserStatus,
};
use helpdesk_tui::api::{AnalyticsApi, ApiError, HelpdeskClient, KnowledgeApi, SettingsApi, UsersApi};
use helpdesk_tui::config::ApiConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn admin_client(server: &MockServer) -> HelpdeskClient {
    let mut client = HelpdeskClient::new(&ApiConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    client.set_token("admin-token");
    client
}

fn user_json(id: i64, role: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Yaya",
        "email": "yaya@cms.sn",
        "role": role,
        "status": status
    })
}

#[tokio::test]
async fn users_are_listed_with_roles_and_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json(1, "superadmin", "active"),
            user_json(2, "agent_interne", "pending"),
            user_json(3, "auditor", "blocked")
        ])))
        .mount(&server)
        .await;

    let users = admin_client(&server).list_users().await.unwrap();
    let roles: Vec<Role> = users.iter().map(|u| u.role).collect();
    assert_eq!(roles, [Role::Superadmin, Role::AgentInterne, Role::Unknown]);
    assert_eq!(users[2].status, UserStatus::Blocked);
}

#[tokio::test]
async fn create_user_sends_password_without_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/users"))
        .and(body_json(json!({
            "name": "Yaya",
            "email": "yaya@cms.sn",
            "password": "s3cret",
            "role": "agent_support"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json(9, "agent_support", "pending")))
        .expect(1)
        .mount(&server)
        .await;

    let payload = UserPayload {
        name: "Yaya".to_string(),
        email: "yaya@cms.sn".to_string(),
        password: Some("s3cret".to_string()),
        role: Role::AgentSupport,
        status: None,
    };
    let user = admin_client(&server).create_user(&payload).await.unwrap();
    assert_eq!(user.id, 9);
    assert_eq!(user.status, UserStatus::Pending);
}

#[tokio::test]
async fn update_user_without_password_leaves_it_out() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/users/9"))
        .and(body_json(json!({
            "name": "Yaya",
            "email": "yaya@cms.sn",
            "role": "client",
            "status": "active"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(9, "client", "active")))
        .expect(1)
        .mount(&server)
        .await;

    let payload = UserPayload {
        name: "Yaya".to_string(),
        email: "yaya@cms.sn".to_string(),
        password: None,
        role: Role::Client,
        status: Some(UserStatus::Active),
    };
    let user = admin_client(&server).update_user(9, &payload).await.unwrap();
    assert_eq!(user.status, UserStatus::Active);
}

#[tokio::test]
async fn duplicate_email_surfaces_the_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/users"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let payload = UserPayload {
        name: "Yaya".to_string(),
        email: "yaya@cms.sn".to_string(),
        password: Some("pw".to_string()),
        role: Role::Client,
        status: None,
    };
    let err = admin_client(&server).create_user(&payload).await.unwrap_err();
    assert_eq!(err.user_message(), "Email already registered");
}

#[tokio::test]
async fn deleting_a_user_accepts_an_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    admin_client(&server).delete_user(4).await.unwrap();
}

#[tokio::test]
async fn forbidden_is_not_a_session_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"detail": "Admin privileges required"})),
        )
        .mount(&server)
        .await;

    let err = admin_client(&server).delete_user(1).await.unwrap_err();
    assert!(!err.is_unauthorized());
    assert_eq!(err.user_message(), "Access denied: Admin privileges required");
}

#[tokio::test]
async fn middleware_settings_round_trip_through_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/middleware"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "log_level": "INFO",
            "waf_enabled": false,
            "rate_limiting_enabled": true,
            "maintenance_mode": false
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/middleware"))
        .and(body_json(json!({
            "log_level": "ERROR",
            "waf_enabled": true,
            "rate_limiting_enabled": true,
            "maintenance_mode": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "log_level": "ERROR",
            "waf_enabled": true,
            "rate_limiting_enabled": true,
            "maintenance_mode": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let current = client.get_middleware_config().await.unwrap();
    assert_eq!(current, MiddlewareConfig::default());

    let wanted = MiddlewareConfig {
        log_level: LogLevel::Error,
        waf_enabled: true,
        ..current
    };
    let saved = client.update_middleware_config(&wanted).await.unwrap();
    assert_eq!(saved, wanted);
}

#[tokio::test]
async fn glpi_update_only_sends_tokens_that_were_entered() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/glpi"))
        .and(body_json(json!({
            "api_url": "http://glpi.local/apirest.php/",
            "app_token": "app-123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = GlpiConfig {
        api_url: "http://glpi.local/apirest.php/".to_string(),
        app_token: Some("app-123".to_string()),
        user_token: None,
    };
    admin_client(&server).update_glpi_config(&config).await.unwrap();
}

#[tokio::test]
async fn document_upload_sends_the_file_as_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/knowledge/documents"))
        .and(body_string_contains("filename=\"faq_cartes.txt\""))
        .and(body_string_contains("Opposition carte"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "filename": "faq_cartes.txt",
            "created_at": "2025-07-09 10:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = std::env::temp_dir().join(format!("helpdesk_upload_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("faq_cartes.txt");
    std::fs::write(&file, "Opposition carte: appeler le 33 800 00 00").unwrap();

    let document = admin_client(&server).upload_document(&file).await.unwrap();
    assert_eq!(document.title, "faq_cartes.txt");
    assert_eq!(document.uploaded_at.as_deref(), Some("2025-07-09 10:00:00"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn missing_upload_file_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let missing = std::env::temp_dir().join("helpdesk_no_such_file.pdf");
    let err = admin_client(&server)
        .upload_document(&missing)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Io { .. }));
}

#[tokio::test]
async fn qa_pairs_and_reindex_hit_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/knowledge/qa"))
        .and(body_json(json!({"question": "Horaires ?", "answer": "8h-17h"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/knowledge/reindex"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"status": "started"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server);
    client
        .add_qa_pair(&QaPair {
            question: "Horaires ?".to_string(),
            answer: "8h-17h".to_string(),
        })
        .await
        .unwrap();
    client.reindex().await.unwrap();
}

#[tokio::test]
async fn agent_stats_request_the_volume_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/agent/analytics"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets_received": 128,
            "recurring_problems": 12,
            "automatic_reports": 28,
            "daily_volume": [
                {"day": "Mon", "count": 14},
                {"day": "Tue", "count": 21}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/agent/tickets/42/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket_id": 42,
            "summary": "Client reports a blocked card after three PIN attempts."
        })))
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let stats = client.get_agent_stats(7).await.unwrap();
    assert_eq!(stats.tickets_received, 128);
    assert_eq!(stats.daily_volume.len(), 2);

    let summary = client.summarize_ticket(42).await.unwrap();
    assert!(summary.summary.contains("blocked card"));
}
