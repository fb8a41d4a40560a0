#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::{TestRequest, TestServer};
use contest_hub::domain::entities::{NewUser, Role};
use contest_hub::domain::repositories::UserRepository;
use contest_hub::error::AppError;
use contest_hub::infrastructure::payments::{DisabledGateway, PaymentGateway};
use contest_hub::infrastructure::persistence::MemoryStore;
use contest_hub::routes::router;
use contest_hub::state::{AppState, Backends};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

pub const TEST_SECRET: &str = "test-signing-secret";

pub const ADMIN: &str = "admin@example.com";
pub const CREATOR: &str = "creator@example.com";
pub const PARTICIPANT: &str = "participant@example.com";

/// Gateway that records the last amount and answers with a fixed secret.
#[derive(Default)]
pub struct FakeGateway {
    pub last_amount: AtomicI64,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<String, AppError> {
        self.last_amount.store(amount_minor, Ordering::SeqCst);
        Ok(format!("pi_test_secret_{amount_minor}_{currency}"))
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Signs a credential for `email`.
    pub fn token(&self, email: &str) -> String {
        let mut claims = Map::new();
        claims.insert("email".to_string(), json!(email));
        self.state.auth_service.issue(claims).unwrap()
    }

    /// Adds the credential header for `email` to a request.
    pub fn as_user(&self, request: TestRequest, email: &str) -> TestRequest {
        with_token(request, &self.token(email))
    }

    /// Creates a pending contest as [`CREATOR`] and returns its id.
    pub async fn create_contest(&self, name: &str, contest_type: &str) -> i64 {
        self.create_contest_with_prize(name, contest_type, 100.0)
            .await
    }

    /// Creates a pending contest with the given prize money and returns its id.
    pub async fn create_contest_with_prize(
        &self,
        name: &str,
        contest_type: &str,
        prize_money: f64,
    ) -> i64 {
        let response = self
            .as_user(self.server.post("/contests"), CREATOR)
            .json(&json!({
                "contestName": name,
                "contestType": contest_type,
                "price": 10,
                "prizeMoney": prize_money
            }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["insertedId"].as_i64().unwrap()
    }

    /// Records a payment for `contest_id` as `email` and returns the record id.
    pub async fn pay(&self, contest_id: i64, email: &str) -> i64 {
        let response = self
            .as_user(self.server.post("/payments"), email)
            .json(&json!({
                "contestId": contest_id,
                "name": email.split('@').next().unwrap(),
                "amount": 10
            }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["insertedId"].as_i64().unwrap()
    }

    /// Sets a contest's status through the admin endpoint.
    pub async fn set_status(&self, contest_id: i64, status: &str) {
        self.as_user(
            self.server
                .patch(&format!("/admin/contests/{contest_id}/status")),
            ADMIN,
        )
        .json(&json!({ "status": status }))
        .await
        .assert_status_ok();
    }
}

pub fn with_token(request: TestRequest, token: &str) -> TestRequest {
    request.add_header("token", token.to_string())
}

/// App over a fresh [`MemoryStore`] with payments disabled.
pub async fn create_test_app() -> TestApp {
    create_test_app_with_gateway(Arc::new(DisabledGateway::new())).await
}

/// App over a fresh [`MemoryStore`], seeded with one admin, one creator and one participant.
pub async fn create_test_app_with_gateway(gateway: Arc<dyn PaymentGateway>) -> TestApp {
    let store = Arc::new(MemoryStore::new());

    for (email, role) in [
        (ADMIN, Role::Admin),
        (CREATOR, Role::Creator),
        (PARTICIPANT, Role::Participant),
    ] {
        store
            .create_if_absent(NewUser {
                email: email.to_string(),
                name: Some(email.split('@').next().unwrap().to_string()),
                photo_url: None,
                role,
                extra: Map::new(),
            })
            .await
            .unwrap();
    }

    let state = AppState::new(
        Backends {
            users: store.clone(),
            contests: store.clone(),
            participations: store.clone(),
            gateway,
        },
        TEST_SECRET,
        24,
    );

    let server = TestServer::new(router(state.clone(), "*")).unwrap();

    TestApp {
        server,
        state,
        store,
    }
}
