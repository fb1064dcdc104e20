//! Account registration handler.
//!
//! ```text
//! POST /api/users {"username":"bobuser","password":"baseball","fullName":"Bob User"}
//! ```
//!
//! The body is read as untyped JSON so missing keys, non-string values, and
//! well-formed strings can be told apart and reported in validation order.

use actix_web::{HttpResponse, http::header, post, web};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{AccountPublicView, AccountRequest, Error, RawField};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Documented shape of the registration body.
///
/// Example JSON:
/// `{"username":"bobuser","password":"baseball","fullName":"Bob User"}`
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountBody {
    /// Unique login name; no surrounding whitespace.
    #[schema(example = "bobuser", min_length = 1)]
    pub username: String,
    /// 8 to 72 characters; no surrounding whitespace.
    #[schema(example = "baseball", min_length = 8, max_length = 72)]
    pub password: String,
    /// Optional display name; trimmed before storage.
    #[schema(example = "Bob User")]
    pub full_name: Option<String>,
}

fn take_field(object: &mut Map<String, Value>, key: &str) -> RawField {
    match object.remove(key) {
        None => RawField::Absent,
        Some(Value::String(text)) => RawField::Text(text),
        Some(_) => RawField::NotText,
    }
}

/// Split a JSON body into raw registration fields.
///
/// Anything other than an object is treated as an object with no keys.
///
/// # Examples
/// ```
/// use backend::domain::RawField;
/// use backend::inbound::http::users::account_request_from_json;
/// use serde_json::json;
///
/// let request = account_request_from_json(json!({ "username": "bob", "password": 7 }));
/// assert_eq!(request.username, RawField::text("bob"));
/// assert_eq!(request.password, RawField::NotText);
/// assert_eq!(request.full_name, RawField::Absent);
/// ```
pub fn account_request_from_json(body: Value) -> AccountRequest {
    let Value::Object(mut object) = body else {
        return AccountRequest::default();
    };
    AccountRequest {
        username: take_field(&mut object, "username"),
        password: take_field(&mut object, "password"),
        full_name: take_field(&mut object, "fullName"),
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterAccountBody,
    responses(
        (
            status = 201,
            description = "Account created",
            body = AccountPublicView,
            headers(("Location" = String, description = "URI of the new account"))
        ),
        (status = 400, description = "Malformed JSON or username already exists", body = Error),
        (status = 422, description = "Field validation failed", body = Error),
        (status = 503, description = "Account storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerAccount"
)]
#[post("/users")]
pub async fn register_account(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let request = account_request_from_json(payload.into_inner());
    let view = state.registration.register(request).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/users/{}", view.id)))
        .json(view))
}
