//! In-memory `AdminApi` used by state tests.
//!
//! Each call is appended to `calls` before the canned response is returned, so
//! tests can assert both what was sent and that nothing was sent.

use std::cell::RefCell;

use crate::net::api::{AdminApi, ApiError, ApiResult, EventQuery, MessageQuery};
use crate::net::types::{Event, EventType, Group, LoginResponse, Message, Stats, User};

#[derive(Debug)]
pub struct MockApi {
    pub calls: RefCell<Vec<String>>,
    pub users: ApiResult<Vec<User>>,
    pub mutation: ApiResult<()>,
    pub elevate: ApiResult<Option<String>>,
    pub groups: ApiResult<Vec<Group>>,
    pub messages: ApiResult<Vec<Message>>,
    pub events: ApiResult<Vec<Event>>,
    pub stats: ApiResult<Stats>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            users: Ok(Vec::new()),
            mutation: Ok(()),
            elevate: Ok(None),
            groups: Ok(Vec::new()),
            messages: Ok(Vec::new()),
            events: Ok(Vec::new()),
            stats: Ok(Stats::default()),
        }
    }
}

impl MockApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl AdminApi for MockApi {
    async fn login(&self, email: &str, _password: &str) -> ApiResult<LoginResponse> {
        self.record(format!("login {email}"));
        Err(ApiError::Server(Some("login not mocked".to_owned())))
    }

    async fn current_user(&self) -> ApiResult<User> {
        self.record("current_user".to_owned());
        Err(ApiError::Server(None))
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.record("list_users".to_owned());
        self.users.clone()
    }

    async fn set_admin(&self, user_id: i64, is_admin: bool) -> ApiResult<()> {
        self.record(format!("set_admin {user_id} {is_admin}"));
        self.mutation.clone()
    }

    async fn delete_user(&self, user_id: i64) -> ApiResult<()> {
        self.record(format!("delete_user {user_id}"));
        self.mutation.clone()
    }

    async fn make_me_admin(&self) -> ApiResult<Option<String>> {
        self.record("make_me_admin".to_owned());
        self.elevate.clone()
    }

    async fn user_groups(&self, user_id: i64) -> ApiResult<Vec<Group>> {
        self.record(format!("user_groups {user_id}"));
        self.groups.clone()
    }

    async fn user_messages(&self, user_id: i64, query: MessageQuery) -> ApiResult<Vec<Message>> {
        self.record(format!("user_messages {user_id} {:?} {}", query.group_id, query.limit));
        let messages = self.messages.clone()?;
        Ok(match query.group_id {
            Some(group_id) => messages.into_iter().filter(|m| m.group_id == group_id).collect(),
            None => messages,
        })
    }

    async fn user_events(&self, user_id: i64, query: EventQuery) -> ApiResult<Vec<Event>> {
        self.record(format!("user_events {user_id} {:?}", query.date));
        self.events.clone()
    }

    async fn user_stats(&self, user_id: i64, group_id: Option<i64>) -> ApiResult<Stats> {
        self.record(format!("user_stats {user_id} {group_id:?}"));
        self.stats.clone()
    }
}

pub fn user(id: i64, is_admin: bool, whatsapp_connected: bool) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        is_admin,
        whatsapp_connected,
        created_at: Some("2025-01-01T00:00:00Z".to_owned()),
    }
}

pub fn group(id: i64, name: &str) -> Group {
    Group { id, name: name.to_owned() }
}

pub fn message(id: i64, group_id: i64, sender: &str, content: &str, timestamp: &str) -> Message {
    Message {
        id,
        group_id,
        sender: sender.to_owned(),
        content: content.to_owned(),
        timestamp: timestamp.to_owned(),
    }
}

pub fn event(id: i64, event_type: EventType, group_id: i64) -> Event {
    Event {
        id,
        event_type,
        group_id,
        timestamp: format!("2025-03-01T10:{:02}:00Z", id % 60),
        member_name: None,
    }
}
