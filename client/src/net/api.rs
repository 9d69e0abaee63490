//! Typed client for the remote admin API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, bearer-authenticated
//! with the session token.
//! Server-side (SSR): every call resolves to a transport error since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result<T, ApiError>`. Transport failures and
//! server-reported failures stay distinct so screens can choose between the
//! generic failure text and the server's own message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{Event, Group, LoginResponse, Message, Stats, User};

/// Notification text used when no better explanation is available.
pub const GENERIC_FAILURE: &str = "Action failed. Please try again.";

/// Failure of a single API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with `success: false`.
    #[error("{}", .0.as_deref().unwrap_or(GENERIC_FAILURE))]
    Server(Option<String>),
}

impl ApiError {
    /// Text to surface in a notification.
    ///
    /// Transport failures always map to [`GENERIC_FAILURE`]; server failures
    /// show the server's message verbatim unless it is absent or blank.
    #[must_use]
    pub fn notice_text(&self) -> String {
        match self {
            Self::Server(Some(message)) if !message.trim().is_empty() => message.clone(),
            Self::Server(_) | Self::Transport(_) => GENERIC_FAILURE.to_owned(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Paging and scope for a message listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageQuery {
    pub group_id: Option<i64>,
    pub limit: u32,
    pub offset: u32,
}

/// Paging and date filter for a timeline listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EventQuery {
    pub date: Option<NaiveDate>,
    pub limit: u32,
    pub offset: u32,
}

/// The remote API as seen by the admin screens.
///
/// `HttpApi` is the browser implementation; tests substitute an in-memory
/// recorder.
pub trait AdminApi {
    fn login(&self, email: &str, password: &str) -> impl Future<Output = ApiResult<LoginResponse>>;
    fn current_user(&self) -> impl Future<Output = ApiResult<User>>;
    fn list_users(&self) -> impl Future<Output = ApiResult<Vec<User>>>;
    fn set_admin(&self, user_id: i64, is_admin: bool) -> impl Future<Output = ApiResult<()>>;
    fn delete_user(&self, user_id: i64) -> impl Future<Output = ApiResult<()>>;
    /// Elevate the caller; resolves to the server's confirmation message.
    fn make_me_admin(&self) -> impl Future<Output = ApiResult<Option<String>>>;
    fn user_groups(&self, user_id: i64) -> impl Future<Output = ApiResult<Vec<Group>>>;
    fn user_messages(&self, user_id: i64, query: MessageQuery) -> impl Future<Output = ApiResult<Vec<Message>>>;
    fn user_events(&self, user_id: i64, query: EventQuery) -> impl Future<Output = ApiResult<Vec<Event>>>;
    fn user_stats(&self, user_id: i64, group_id: Option<i64>) -> impl Future<Output = ApiResult<Stats>>;
}

// =============================================================================
// ENDPOINTS
// =============================================================================

pub(crate) const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub(crate) const ME_ENDPOINT: &str = "/api/auth/me";
pub(crate) const USERS_ENDPOINT: &str = "/api/admin/users";
pub(crate) const MAKE_ME_ADMIN_ENDPOINT: &str = "/api/admin/make-me-admin";

pub(crate) fn user_endpoint(user_id: i64) -> String {
    format!("{USERS_ENDPOINT}/{user_id}")
}

pub(crate) fn admin_flag_endpoint(user_id: i64) -> String {
    format!("{USERS_ENDPOINT}/{user_id}/admin")
}

pub(crate) fn groups_endpoint(user_id: i64) -> String {
    format!("{USERS_ENDPOINT}/{user_id}/groups")
}

pub(crate) fn messages_endpoint(user_id: i64, query: &MessageQuery) -> String {
    let mut url = format!(
        "{USERS_ENDPOINT}/{user_id}/messages?limit={}&offset={}",
        query.limit, query.offset
    );
    if let Some(group_id) = query.group_id {
        url.push_str(&format!("&group_id={group_id}"));
    }
    url
}

pub(crate) fn events_endpoint(user_id: i64, query: &EventQuery) -> String {
    let mut url = format!(
        "{USERS_ENDPOINT}/{user_id}/events?limit={}&offset={}",
        query.limit, query.offset
    );
    if let Some(date) = query.date {
        url.push_str(&format!("&date={}", date.format("%Y-%m-%d")));
    }
    url
}

pub(crate) fn stats_endpoint(user_id: i64, group_id: Option<i64>) -> String {
    match group_id {
        Some(group_id) => format!("{USERS_ENDPOINT}/{user_id}/stats?group_id={group_id}"),
        None => format!("{USERS_ENDPOINT}/{user_id}/stats"),
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// Interpret a response body against the `{ success, error, ... }` envelope.
///
/// A missing `success` flag falls back to the HTTP status. A body that is not
/// JSON is a transport failure.
pub fn check_envelope(status: u16, body: Option<Value>) -> ApiResult<Value> {
    let status_ok = (200..300).contains(&status);
    let Some(body) = body else {
        return Err(ApiError::Transport(format!("unreadable response (status {status})")));
    };
    let success = body.get("success").and_then(Value::as_bool).unwrap_or(status_ok);
    if success && status_ok {
        return Ok(body);
    }
    let message = body
        .get("error")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);
    Err(ApiError::Server(message))
}

/// Decode one named payload field out of a successful envelope.
pub fn take_field<T: DeserializeOwned>(body: &mut Value, field: &str) -> ApiResult<T> {
    let raw = body
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ApiError::Transport(format!("missing field `{field}`")))?;
    serde_json::from_value(raw).map_err(|e| ApiError::Transport(format!("invalid `{field}`: {e}")))
}

/// Optional `message` string of a successful envelope.
pub fn confirmation_message(body: &Value) -> Option<String> {
    body.get("message").and_then(Value::as_str).map(ToOwned::to_owned)
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

/// Browser API client. Cheap to clone; carries only the bearer token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpApi {
    token: Option<String>,
}

#[derive(Clone, Copy, Debug)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpApi {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    #[cfg(feature = "hydrate")]
    async fn send(&self, verb: Verb, url: &str, payload: Option<Value>) -> ApiResult<Value> {
        use gloo_net::http::Request;

        let builder = match verb {
            Verb::Get => Request::get(url),
            Verb::Post => Request::post(url),
            Verb::Put => Request::put(url),
            Verb::Delete => Request::delete(url),
        };
        let builder = match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        };
        let request = match payload {
            Some(json) => builder.json(&json),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let resp = request.send().await.map_err(|e| {
            log::warn!("{} {url} failed: {e}", verb_name(verb));
            ApiError::Transport(e.to_string())
        })?;
        let status = resp.status();
        let body = resp.json::<Value>().await.ok();
        let result = check_envelope(status, body);
        if let Err(e) = &result {
            log::warn!("{} {url} -> {status}: {e}", verb_name(verb));
        }
        result
    }

    #[cfg(not(feature = "hydrate"))]
    async fn send(&self, verb: Verb, url: &str, payload: Option<Value>) -> ApiResult<Value> {
        let _ = (verb, url, payload, &self.token);
        Err(ApiError::Transport("not available on server".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
fn verb_name(verb: Verb) -> &'static str {
    match verb {
        Verb::Get => "GET",
        Verb::Post => "POST",
        Verb::Put => "PUT",
        Verb::Delete => "DELETE",
    }
}

impl AdminApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let payload = serde_json::json!({ "email": email, "password": password });
        let body = self.send(Verb::Post, LOGIN_ENDPOINT, Some(payload)).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Transport(format!("invalid login response: {e}")))
    }

    async fn current_user(&self) -> ApiResult<User> {
        let mut body = self.send(Verb::Get, ME_ENDPOINT, None).await?;
        take_field(&mut body, "user")
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let mut body = self.send(Verb::Get, USERS_ENDPOINT, None).await?;
        take_field(&mut body, "users")
    }

    async fn set_admin(&self, user_id: i64, is_admin: bool) -> ApiResult<()> {
        let payload = serde_json::json!({ "is_admin": is_admin });
        self.send(Verb::Put, &admin_flag_endpoint(user_id), Some(payload))
            .await
            .map(|_| ())
    }

    async fn delete_user(&self, user_id: i64) -> ApiResult<()> {
        self.send(Verb::Delete, &user_endpoint(user_id), None).await.map(|_| ())
    }

    async fn make_me_admin(&self) -> ApiResult<Option<String>> {
        let body = self.send(Verb::Post, MAKE_ME_ADMIN_ENDPOINT, None).await?;
        Ok(confirmation_message(&body))
    }

    async fn user_groups(&self, user_id: i64) -> ApiResult<Vec<Group>> {
        let mut body = self.send(Verb::Get, &groups_endpoint(user_id), None).await?;
        take_field(&mut body, "groups")
    }

    async fn user_messages(&self, user_id: i64, query: MessageQuery) -> ApiResult<Vec<Message>> {
        let mut body = self.send(Verb::Get, &messages_endpoint(user_id, &query), None).await?;
        take_field(&mut body, "messages")
    }

    async fn user_events(&self, user_id: i64, query: EventQuery) -> ApiResult<Vec<Event>> {
        let mut body = self.send(Verb::Get, &events_endpoint(user_id, &query), None).await?;
        take_field(&mut body, "events")
    }

    async fn user_stats(&self, user_id: i64, group_id: Option<i64>) -> ApiResult<Stats> {
        let mut body = self.send(Verb::Get, &stats_endpoint(user_id, group_id), None).await?;
        take_field(&mut body, "stats")
    }
}
