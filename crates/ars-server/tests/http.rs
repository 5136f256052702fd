use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

use ars_dialog::error::DialogError;
use ars_dialog::gateway::{Gateway, OutboundMessage};
use ars_dialog::messages;
use ars_dialog::settings::SharedSettings;
use ars_server::config::ServerConfig;
use ars_server::middleware::audit::Conversation;
use ars_server::state::AppState;
use ars_storage::BoxFuture;

struct ChannelGateway {
    tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl Gateway for ChannelGateway {
    fn send(&self, message: OutboundMessage) -> BoxFuture<'_, Result<(), DialogError>> {
        Box::pin(async move {
            self.tx
                .send(message)
                .map_err(|e| DialogError::UpstreamGateway(e.to_string()))
        })
    }
}

struct DownGateway;

impl Gateway for DownGateway {
    fn send(&self, _message: OutboundMessage) -> BoxFuture<'_, Result<(), DialogError>> {
        Box::pin(async { Err(DialogError::UpstreamGateway("connection refused".to_string())) })
    }
}

fn test_app() -> (Router, mpsc::UnboundedReceiver<OutboundMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = AppState::in_memory(
        SharedSettings::default(),
        Arc::new(ChannelGateway { tx }),
        Duration::from_secs(5),
    );
    (ars_server::app(state, &ServerConfig::default()), rx)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn call_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = call(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn register(app: &Router, phone: &str) -> Value {
    let (status, patient) = call_json(
        app,
        post_json(
            "/patients",
            json!({
                "firstName": "Ada",
                "lastName": "Okafor",
                "state": "Lagos",
                "lga": "Ikeja",
                "phoneNumber": phone,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    patient
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _rx) = test_app();
    let (status, body) = call_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn questions_hide_inactive_groups() {
    let (app, _rx) = test_app();

    let (status, web) = call_json(&app, get("/questions")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = web
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_u64().unwrap())
        .collect();
    assert!(ids.contains(&9));
    assert!(!ids.contains(&12));
    let first = &web[0]["questions"][0];
    assert!(first.get("responseType").is_some());
    assert!(first.get("rule").is_none());

    let (_, ussd) = call_json(&app, get("/questions?platform=ussd")).await;
    assert!(ussd.as_array().unwrap().len() < web.as_array().unwrap().len());

    let (status, _) = call_json(&app, get("/questions?platform=fax")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patients_register_with_a_code_and_reject_duplicates() {
    let (app, _rx) = test_app();
    let patient = register(&app, "0803 123 4567").await;
    assert_eq!(patient["phoneNumber"], "+2348031234567");
    let code = patient["code"].as_str().unwrap();
    assert_eq!(code.len(), 7);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let (status, fetched) = call_json(&app, get(&format!("/patients/{}", patient["id"].as_str().unwrap()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, patient);

    let (status, body) = call_json(
        &app,
        post_json(
            "/patients",
            json!({
                "firstName": "Bisi",
                "lastName": "Adeyemi",
                "state": "Oyo",
                "lga": "Ibadan North",
                "phoneNumber": "+2348031234567",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "a patient with this phone number already exists");
}

#[tokio::test]
async fn stratify_scores_and_persists() {
    let (app, _rx) = test_app();
    let patient = register(&app, "+2348031234567").await;

    let submission = json!({
        "patient_id": patient["id"],
        "platform": "web",
        "response": [
            {"id": 9, "questions": [{"number": "a", "response": "Yes"}]},
            {"id": 6, "questions": [{"number": "a", "response": "Yes"}]},
        ],
    });
    let (status, record) = call_json(&app, post_json("/risk/stratify", submission)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["risk_level"], "high");
    assert_eq!(record["risk_value"], 8);
    assert_eq!(record["patient_id"], patient["id"]);

    let id = record["id"].as_str().unwrap();
    let (status, fetched) = call_json(&app, get(&format!("/risk/results/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, record);

    let (status, listed) = call_json(&app, get("/risk/results?start_date=2000-01-01")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, none) = call_json(&app, get("/risk/results?end_date=2000-01-01")).await;
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn stratify_requires_a_known_patient() {
    let (app, _rx) = test_app();
    let submission = json!({
        "patient_id": Uuid::new_v4(),
        "platform": "web",
        "response": [{"id": 9, "questions": [{"number": "a", "response": "No"}]}],
    });
    let (status, body) = call_json(&app, post_json("/risk/stratify", submission)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Patient not found!");
}

#[tokio::test]
async fn stratify_rejects_unknown_questions_without_persisting() {
    let (app, _rx) = test_app();
    let patient = register(&app, "+2348031234567").await;
    let submission = json!({
        "patient_id": patient["id"],
        "platform": "ussd",
        "response": [{"id": 7, "questions": [{"number": "a", "response": "Twins"}]}],
    });
    let (status, _) = call_json(&app, post_json("/risk/stratify", submission)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, listed) = call_json(&app, get("/risk/results")).await;
    assert!(listed.as_array().unwrap().is_empty());

    let empty = json!({"patient_id": patient["id"], "platform": "web", "response": []});
    let (status, _) = call_json(&app, post_json("/risk/stratify", empty)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn errors_carry_the_request_in_their_envelope() {
    let (app, _rx) = test_app();
    let id = Uuid::new_v4();
    let path = format!("/risk/results/{id}");
    let (status, body) = call_json(&app, get(&path)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["error"], "Risk record not found!");
    assert_eq!(body["path"], path);
    assert_eq!(body["method"], "GET");
    assert!(body["timestamp"].is_string());

    let (status, body) = call_json(&app, get("/risk/results/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);

    let (status, body) = call_json(&app, get("/nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cannot GET /nowhere");
    assert_eq!(body["path"], "/nowhere");

    let (status, body) = call_json(&app, post_json("/risk/stratify", json!({"platform": "web"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["method"], "POST");
}

#[tokio::test]
async fn config_updates_only_gateway_keys() {
    let (app, _rx) = test_app();

    let (status, config) = call_json(&app, get("/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["timeZone"], "Africa/Lagos");

    let (status, updated) = call_json(&app, post("/config/rapidProAPIToken/secret-token")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["rapidProAPIToken"], "secret-token");

    let (_, value) = call_json(&app, get("/config/rapidProAPIToken")).await;
    assert_eq!(value, "secret-token");
    let (_, stored) = call_json(&app, get("/config")).await;
    assert_eq!(stored, updated);

    let (status, _) = call_json(&app, post("/config/timeZone/UTC")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call_json(&app, get("/config/colour")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn turn_from_an_unknown_phone_asks_for_a_code() {
    let (app, _rx) = test_app();
    let (status, body) = call(
        &app,
        post_form(
            "/dialog/turn",
            "serviceCode=%2A347%2A8%23&phoneNumber=%2B2348099999999&text=&sessionId=ATUid_9",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("CON {}", messages::PHONE_NOT_FOUND));
}

#[tokio::test]
async fn dialog_round_trip_over_http() {
    let (app, mut rx) = test_app();
    register(&app, "+2348031234567").await;

    let turn_app = app.clone();
    let pending = tokio::spawn(async move {
        call(
            &turn_app,
            post_form(
                "/dialog/turn",
                "serviceCode=%2A347%2A8%23&phoneNumber=08031234567&text=&sessionId=ATUid_1",
            ),
        )
        .await
    });

    let sent = rx.recv().await.unwrap();
    assert_eq!(sent.text, messages::FLOW_TRIGGER);

    let (status, ack) = call(
        &app,
        post_json(
            "/dialog/delivery",
            json!({
                "to": sent.from,
                "text": "Q9a Are you bleeding from your vagina?\n1. Yes\n2. No",
                "id": 9001,
                "channel": "channel-1",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, messages::DELIVERY_ACK);

    let (status, reply) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, "CON Are you bleeding from your vagina?\n1. Yes\n2. No");

    let (status, log) = call_json(&app, get("/dialog/messages/08031234567")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn gateway_failure_is_a_bad_gateway() {
    let state = AppState::in_memory(
        SharedSettings::default(),
        Arc::new(DownGateway),
        Duration::from_secs(5),
    );
    let app = ars_server::app(state, &ServerConfig::default());
    register(&app, "+2348031234567").await;

    let (status, body) = call_json(
        &app,
        post_form("/dialog/turn", "phoneNumber=08031234567&text=&sessionId=ATUid_1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "connection refused");
}

#[tokio::test]
async fn dialog_responses_carry_their_conversation() {
    let state = AppState::in_memory(
        SharedSettings::default(),
        Arc::new(DownGateway),
        Duration::from_secs(5),
    );
    let app = ars_server::app(state, &ServerConfig::default());

    let response = app
        .clone()
        .oneshot(post_form(
            "/dialog/turn",
            "phoneNumber=%2B2348099999999&text=&sessionId=ATUid_9",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.extensions().get::<Conversation>(),
        Some(&Conversation("8099999999".to_string()))
    );

    register(&app, "+2348031234567").await;
    let response = app
        .clone()
        .oneshot(post_form("/dialog/turn", "phoneNumber=08031234567&text=&sessionId=ATUid_1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.extensions().get::<Conversation>(),
        Some(&Conversation("8031234567".to_string()))
    );

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert!(response.extensions().get::<Conversation>().is_none());
}
