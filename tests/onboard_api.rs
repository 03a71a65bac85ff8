//! Integration tests for the onboarding REST API.
//!
//! Each test spins up an Axum server on a random port over an in-memory
//! store and exercises the real HTTP contract with reqwest — including the
//! wizard driving a live submission through the HTTP gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use wellness_intake::error::NotifyError;
use wellness_intake::gateway::HttpGateway;
use wellness_intake::notify::Notifier;
use wellness_intake::profile::{ActivityLevel, FitnessGoal, Sex, StoredProfile, WeightUnit};
use wellness_intake::server::{AppState, api_routes};
use wellness_intake::store::{LibSqlBackend, ProfileStore};
use wellness_intake::wizard::{DraftUpdate, WizardState, WizardStep};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Notifier stub that counts deliveries.
struct RecordingNotifier {
    calls: AtomicU32,
}

impl RecordingNotifier {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn new_submission(&self, _record: &StoredProfile) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Notifier stub whose delivery always fails.
struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn new_submission(&self, _record: &StoredProfile) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("connection refused".into()))
    }
}

/// Start a server on a random port. Returns its base URL.
async fn start_server(notifier: Option<Arc<dyn Notifier>>) -> String {
    let store: Arc<dyn ProfileStore> = Arc::new(LibSqlBackend::new_memory().await.unwrap());
    let app = api_routes(AppState { store, notifier });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

/// The canonical valid submission body.
fn jane_doe() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "age": 30,
        "sex": "Female",
        "weight": 65,
        "weightUnit": "kg",
        "activityLevel": "Moderate",
        "fitnessGoal": "Maintain Weight",
        "allergies": ["Peanuts"],
        "healthConditions": [],
        "spiceLevel": 3,
        "frequentMeal": "Rice",
        "bestFood": "Sushi",
        "worstFood": "Cilantro",
        "phone": "555-1234",
        "address": "1 Main St",
    })
}

async fn post_onboard(base: &str, body: &Value) -> (reqwest::StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/onboard"))
        .json(body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    let json: Value = response.json().await.unwrap();
    (status, json)
}

// ── Submission endpoint ──────────────────────────────────────────────

#[tokio::test]
async fn onboard_valid_submission_returns_201_with_id() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let (status, body) = post_onboard(&base, &jane_doe()).await;

        assert_eq!(status, reqwest::StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User onboarded successfully");
        let id = body["userId"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboard_persists_record_for_listing() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;
        let (_, created) = post_onboard(&base, &jane_doe()).await;

        let users: Value = reqwest::get(format!("{base}/api/users"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let users = users.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["id"], created["userId"]);
        assert_eq!(users[0]["name"], "Jane Doe");
        assert_eq!(users[0]["activityLevel"], "Moderate");
        assert_eq!(users[0]["allergies"], json!(["Peanuts"]));
        assert!(users[0]["createdAt"].as_str().is_some());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboard_rejects_out_of_range_age() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let mut body = jane_doe();
        body["age"] = json!(200);
        let (status, response) = post_onboard(&base, &body).await;

        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
        assert_eq!(response["message"], "Validation error");

        // Nothing was persisted.
        let users: Value = reqwest::get(format!("{base}/api/users"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(users.as_array().unwrap().is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboard_rejects_unknown_enum_literal() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let mut body = jane_doe();
        body["activityLevel"] = json!("Extremely Active");
        let (status, response) = post_onboard(&base, &body).await;

        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Validation error");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboard_rejects_missing_required_field() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let mut body = jane_doe();
        body.as_object_mut().unwrap().remove("name");
        let (status, _) = post_onboard(&base, &body).await;

        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboard_accepts_missing_optional_fields() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;

        let mut body = jane_doe();
        let obj = body.as_object_mut().unwrap();
        obj.remove("phone");
        obj.remove("address");
        let (status, _) = post_onboard(&base, &body).await;

        assert_eq!(status, reqwest::StatusCode::CREATED);
    })
    .await
    .expect("test timed out");
}

// ── Notification behavior ────────────────────────────────────────────

#[tokio::test]
async fn notifier_receives_each_submission() {
    timeout(TEST_TIMEOUT, async {
        let notifier = RecordingNotifier::new();
        let base = start_server(Some(notifier.clone())).await;

        post_onboard(&base, &jane_doe()).await;
        post_onboard(&base, &jane_doe()).await;

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 2);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn notification_failure_does_not_fail_submission() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(Some(Arc::new(FailingNotifier))).await;

        let (status, body) = post_onboard(&base, &jane_doe()).await;

        assert_eq!(status, reqwest::StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert!(body["userId"].as_str().is_some());
    })
    .await
    .expect("test timed out");
}

// ── Wizard driving the live endpoint ─────────────────────────────────

fn filled_wizard() -> WizardState {
    let mut wizard = WizardState::new();
    wizard.update(DraftUpdate {
        name: Some("Jane Doe".into()),
        email: Some("jane@x.com".into()),
        age: Some(30),
        sex: Some(Sex::Female),
        phone: Some("555-1234".into()),
        address: Some("1 Main St".into()),
        ..Default::default()
    });
    wizard.advance().unwrap();
    wizard.update(DraftUpdate {
        weight: Some(65.0),
        weight_unit: Some(WeightUnit::Kg),
        activity_level: Some(ActivityLevel::Moderate),
        fitness_goal: Some(FitnessGoal::MaintainWeight),
        ..Default::default()
    });
    wizard.advance().unwrap();
    wizard.draft_mut().add_allergy("Peanuts");
    wizard.advance().unwrap();
    wizard.update(DraftUpdate {
        spice_level: Some(3),
        frequent_meal: Some("Rice".into()),
        best_food: Some("Sushi".into()),
        worst_food: Some("Cilantro".into()),
        ..Default::default()
    });
    wizard
}

#[tokio::test]
async fn wizard_full_flow_submits_through_gateway() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;
        let gateway = HttpGateway::new(format!("{base}/api/onboard"));

        let mut wizard = filled_wizard();
        assert_eq!(wizard.step(), WizardStep::Palate);

        let receipt = wizard.submit(&gateway).await.unwrap();
        assert_eq!(wizard.step(), WizardStep::Complete);
        assert!(uuid::Uuid::parse_str(&receipt.id).is_ok());

        let users: Value = reqwest::get(format!("{base}/api/users"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(users.as_array().unwrap().len(), 1);
        assert_eq!(users[0]["id"], receipt.id);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn wizard_stays_on_palate_when_server_rejects() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(None).await;
        let gateway = HttpGateway::new(format!("{base}/api/onboard"));

        // Step validation only checks that age is set; the server's range
        // check is what rejects this draft.
        let mut wizard = filled_wizard();
        wizard.update(DraftUpdate {
            age: Some(200),
            ..Default::default()
        });

        let err = wizard.submit(&gateway).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Something went wrong. Please try again."
        );
        assert_eq!(wizard.step(), WizardStep::Palate);

        // Correct the field and resubmit manually.
        wizard.update(DraftUpdate {
            age: Some(30),
            ..Default::default()
        });
        wizard.submit(&gateway).await.unwrap();
        assert_eq!(wizard.step(), WizardStep::Complete);
    })
    .await
    .expect("test timed out");
}
