//! Behaviour tests for account registration over HTTP.
//!
//! Scenarios drive `POST /api/users` against an in-memory account store and
//! check the status, the response body, and what ended up stored.

use std::sync::Arc;

use actix_web::test as actix_test;
use actix_web::{App, web};
use backend::Trace;
use backend::domain::AccountRegistrationService;
use backend::inbound::http::api_scope;
use backend::inbound::http::state::HttpState;
use backend::outbound::credentials::{Argon2CredentialHasher, HashingCost};
use backend::outbound::memory::InMemoryAccountRepository;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};

// -----------------------------------------------------------------------------
// Test World
// -----------------------------------------------------------------------------

#[derive(Default, ScenarioState)]
struct RegistrationWorld {
    accounts: Slot<Arc<InMemoryAccountRepository>>,
    state: Slot<web::Data<HttpState>>,
    last_status: Slot<u16>,
    last_body: Slot<Value>,
}

impl RegistrationWorld {
    fn install_store(&self) {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let hasher = Argon2CredentialHasher::new(HashingCost::insecure_for_tests()).expect("valid cost");
        let service = AccountRegistrationService::new(accounts.clone(), Arc::new(hasher));
        self.accounts.set(accounts);
        self.state
            .set(web::Data::new(HttpState::new(Arc::new(service))));
    }

    fn post_registration(&self, body: Value) -> (u16, Value) {
        let state = self.state.get().expect("account store installed");
        actix_rt::System::new().block_on(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(state)
                    .wrap(Trace)
                    .service(api_scope()),
            )
            .await;
            let request = actix_test::TestRequest::post()
                .uri("/api/users")
                .set_json(body)
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            let status = response.status().as_u16();
            let body: Value = actix_test::read_body_json(response).await;
            (status, body)
        })
    }

    fn register(&self, username: &str, password: &str) {
        let (status, body) = self.post_registration(json!({
            "username": username,
            "password": password,
            "fullName": "Bob User",
        }));
        self.last_status.set(status);
        self.last_body.set(body);
    }
}

#[fixture]
fn world() -> RegistrationWorld {
    RegistrationWorld::default()
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("an empty account store")]
fn an_empty_account_store(world: &RegistrationWorld) {
    world.install_store();
}

#[given("an account store that already holds \"{username}\"")]
fn an_account_store_that_already_holds(world: &RegistrationWorld, username: String) {
    world.install_store();
    let (status, _) = world.post_registration(json!({
        "username": username,
        "password": "seed-password",
    }));
    assert_eq!(status, 201, "seeding the store should succeed");
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("a client registers \"{username}\" with password \"{password}\"")]
fn a_client_registers(world: &RegistrationWorld, username: String, password: String) {
    world.register(&username, &password);
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("the response status is {status:u16}")]
fn the_response_status_is(world: &RegistrationWorld, status: u16) {
    assert_eq!(world.last_status.get(), Some(status));
}

#[then("the response exposes only the public account fields")]
fn the_response_exposes_only_the_public_account_fields(world: &RegistrationWorld) {
    let body = world.last_body.get().expect("response body");
    let object = body.as_object().expect("object body");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["fullName", "id", "username"]);
    assert_eq!(body["username"], "bobuser");
    assert_eq!(body["fullName"], "Bob User");
}

#[then("the response message is \"{message}\"")]
fn the_response_message_is(world: &RegistrationWorld, message: String) {
    let body = world.last_body.get().expect("response body");
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(message.as_str())
    );
}

#[then("the account store is empty")]
fn the_account_store_is_empty(world: &RegistrationWorld) {
    let accounts = world.accounts.get().expect("account store installed");
    assert!(accounts.is_empty().expect("store readable"));
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/account_registration.feature",
    name = "Registering a new account"
)]
fn registering_a_new_account(world: RegistrationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/account_registration.feature",
    name = "Registering a taken username"
)]
fn registering_a_taken_username(world: RegistrationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/account_registration.feature",
    name = "Registering with a short password"
)]
fn registering_with_a_short_password(world: RegistrationWorld) {
    let _ = world;
}
