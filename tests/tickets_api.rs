use helpdesk_tui::api::types::{Role, TicketStatus};
use helpdesk_tui::api::{ApiError, AuthApi, HelpdeskClient, TicketsApi};
use helpdesk_tui::config::ApiConfig;
use helpdesk_tui::conversation::{Sender, build_conversation};
use serde_json::json;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HelpdeskClient {
    HelpdeskClient::new(&ApiConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn signed_in(server: &MockServer) -> HelpdeskClient {
    let mut client = client_for(server);
    client.set_token("tok");
    client
}

#[tokio::test]
async fn login_posts_form_and_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_string_contains("username=client%40cms.sn"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-123",
            "token_type": "bearer",
            "user": {
                "id": 4,
                "name": "Client",
                "email": "client@cms.sn",
                "role": "client",
                "status": "active"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .login("client@cms.sn", "secret")
        .await
        .unwrap();
    assert_eq!(response.access_token, "jwt-123");
    assert_eq!(response.user.role, Role::Client);
}

#[tokio::test]
async fn rejected_login_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect credentials"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login("client@cms.sn", "wrong")
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Invalid email or password.");
}

#[tokio::test]
async fn my_tickets_carry_the_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Carte bloquée", "status": 2, "date": "2025-07-09 10:00:00"},
            {"id": 2, "title": "Virement", "status": 6}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tickets = signed_in(&server).list_my_tickets().await.unwrap();
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].status, TicketStatus::Assigned);
    assert_eq!(tickets[1].name, "Virement");
    assert!(!tickets[1].status.is_open());
}

#[tokio::test]
async fn requests_without_token_never_leave_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).list_tickets().await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));
}

#[tokio::test]
async fn conversation_merges_ticket_and_followups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Paiement refusé",
            "status": 1,
            "date": "2025-07-09 09:00:00",
            "content": "CLIENT_MSG::Mon paiement a échoué &amp; je suis débité"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/7/followups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "content": "CLIENT_MSG::Des nouvelles ?", "date_creation": "2025-07-09 12:00:00"},
            {"id": 10, "content": "Nous analysons votre dossier", "date_creation": "2025-07-09 10:30:00"}
        ])))
        .mount(&server)
        .await;

    let (ticket, followups) = signed_in(&server).fetch_conversation(7).await.unwrap();
    let messages = build_conversation(&ticket, &followups);

    let senders: Vec<Sender> = messages.iter().map(|m| m.sender).collect();
    assert_eq!(senders, [Sender::Client, Sender::Agent, Sender::Client]);
    assert_eq!(messages[1].text, "Nous analysons votre dossier");
    assert!(messages[0].text.contains("& je suis"));
}

#[tokio::test]
async fn conversation_fails_when_followups_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "x", "status": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/7/followups"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "GLPI unreachable"})),
        )
        .mount(&server)
        .await;

    let err = signed_in(&server).fetch_conversation(7).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "The server reported an error (500): GLPI unreachable"
    );
}

#[tokio::test]
async fn followup_and_ticket_creation_send_json_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/3/followups"))
        .and(body_json(json!({"content": "AGENT_MSG::Nous vérifions"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 40, "content": "AGENT_MSG::Nous vérifions"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tickets"))
        .and(body_json(json!({
            "name": "Carte bloquée",
            "content": "CLIENT_MSG::Carte bloquée"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 12, "name": "Carte bloquée", "status": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in(&server);
    let followup = client
        .add_followup(3, "AGENT_MSG::Nous vérifions")
        .await
        .unwrap();
    assert_eq!(followup.id, 40);

    let ticket = client
        .create_ticket("Carte bloquée", "CLIENT_MSG::Carte bloquée")
        .await
        .unwrap();
    assert_eq!(ticket.id, 12);
}

#[tokio::test]
async fn expired_token_is_reported_as_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = signed_in(&server).list_tickets().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = {
        let mut client = HelpdeskClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(500),
        })
        .unwrap();
        client.set_token("tok");
        client
    };

    let err = client.list_my_tickets().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn truncated_success_body_is_a_transport_error() {
    // Promises 200 bytes of JSON, sends a few, then hangs up.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n[{\"id\": 1,",
            )
            .await
            .unwrap();
    });

    let mut client = HelpdeskClient::new(&ApiConfig {
        base_url: format!("http://{addr}"),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    client.set_token("tok");

    let err = client.list_my_tickets().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}
