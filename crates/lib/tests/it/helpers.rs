//! Shared test fixtures.

use std::sync::Arc;

use bazaar::FixedClock;
use bazaar::server::AppState;
use bazaar::store::{Database, InMemory};
use bazaar::users::CreateUser;

/// A full service graph over a fresh in-memory store and a fixed clock.
pub struct TestApp {
    pub state: AppState,
    pub clock: Arc<FixedClock>,
}

pub fn test_app() -> TestApp {
    let db: Arc<dyn Database> = Arc::new(InMemory::new());
    let clock = Arc::new(FixedClock::default());
    let state = AppState::new(db, "test-secret", clock.clone()).expect("state builds");
    TestApp { state, clock }
}

/// Registers an account and returns its id.
pub fn register(app: &TestApp, email: &str) -> String {
    app.state
        .users
        .register(CreateUser {
            email: email.to_string(),
            password: "correct horse".to_string(),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
        })
        .expect("registration succeeds")
        .id
}

/// Registers an account, verifies it, and promotes it to admin.
pub fn register_admin(app: &TestApp, email: &str) -> String {
    let id = register(app, email);
    app.state
        .users
        .update(
            &id,
            &bazaar::users::UpdateUser {
                is_admin: Some(true),
                ..Default::default()
            },
            "test-harness",
        )
        .expect("promotion succeeds");
    id
}
