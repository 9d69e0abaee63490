//! Read-only viewer state for inspecting another user's messaging data.
//!
//! SYSTEM CONTEXT
//! ==============
//! `pages::user_viewer` owns one `RwSignal<ViewerState>` per route instance.
//! After every change (route parameter, group selection, date filter, arrived
//! response) the page calls [`ViewerState::plan`], spawns [`fetch`] for each
//! returned key, and hands results back through [`ViewerState::apply`].
//!
//! FETCH GATING
//! ============
//! Nothing is fetched without a valid target. Bulk messages, events and stats
//! wait until the group list has arrived non-empty; the per-group thread only
//! exists while a group is selected. Every slot is keyed by its scope, so a
//! stale response for a previous selection is dropped on arrival.
//!
//! PHASES
//! ======
//! `Disabled` (no valid target) | `LoadingGroups` -> `Empty` | `Ready` |
//! `Failed`. Selecting a group inside `Ready` only re-scopes the thread,
//! stats and analytics.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::net::api::{AdminApi, ApiResult, EventQuery, MessageQuery};
use crate::net::types::{Event, EventType, Group, Message, Stats, User};
use crate::state::query::{QueryKey, Slot};
use crate::util::format::{compare_timestamps, truncate_preview};

/// Page size of the cross-group message fetch used for group previews.
pub const BULK_MESSAGE_LIMIT: u32 = 100;
/// Page size of a single group's thread.
pub const THREAD_MESSAGE_LIMIT: u32 = 500;
/// Page size of the timeline fetch.
pub const EVENT_LIMIT: u32 = 1000;
/// Characters kept in a group's last-message preview.
pub const PREVIEW_CHARS: usize = 60;

pub const READ_ONLY_ADD: &str = "This is a read-only view. Groups cannot be added while inspecting another user.";
pub const READ_ONLY_DELETE: &str =
    "This is a read-only view. Groups cannot be deleted while inspecting another user.";

/// Where presentation analytics come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalyticsSource {
    /// Derive counts from the fetched events and messages.
    #[default]
    Inline,
    /// Use the server's `analytics` block when present.
    Server,
}

/// Initial value of the event date filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateDefault {
    /// No date filter: the whole timeline.
    #[default]
    Unset,
    /// Today's events only.
    Today,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewerOptions {
    pub analytics: AnalyticsSource,
    pub date_default: DateDefault,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerPhase {
    Disabled,
    LoadingGroups,
    Empty,
    Ready,
    Failed(String),
}

/// Interactions raised by the shared group-list control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupListAction {
    Select(Option<i64>),
    Add,
    Delete(i64),
}

/// One response, tagged by entity type.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Users(ApiResult<Vec<User>>),
    Groups(ApiResult<Vec<Group>>),
    Messages(ApiResult<Vec<Message>>),
    Events(ApiResult<Vec<Event>>),
    Stats(ApiResult<Stats>),
}

/// A group row with client-derived fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSummary {
    pub id: i64,
    pub name: String,
    pub last_message: Option<String>,
    pub last_message_time: Option<String>,
    /// Always zero: nothing is "read" in the admin view.
    pub unread_count: u32,
}

/// Figures shown in the analytics pane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Analytics {
    pub total_members: i64,
    pub joins: i64,
    pub leaves: i64,
    pub messages: i64,
    /// Distinct senders, used as an activity proxy.
    pub active_users: i64,
    pub certificates: i64,
}

/// Parse the `:id` route parameter. Anything but a positive integer disables
/// the viewer.
#[must_use]
pub fn parse_target_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[derive(Clone, Debug, Default)]
pub struct ViewerState {
    pub target: Option<i64>,
    pub options: ViewerOptions,
    /// Full user list, used only to resolve the target's display identity.
    pub directory: Slot<Vec<User>>,
    pub groups: Slot<Vec<Group>>,
    /// Recent messages across all groups, for previews and all-group counts.
    pub messages: Slot<Vec<Message>>,
    /// Thread of the selected group.
    pub thread: Slot<Vec<Message>>,
    pub events: Slot<Vec<Event>>,
    pub stats: Slot<Stats>,
    pub selected_group: Option<i64>,
    pub event_date: Option<NaiveDate>,
    /// Blocking read-only explanation awaiting dismissal.
    pub blocked: Option<&'static str>,
}

impl ViewerState {
    #[must_use]
    pub fn new(options: ViewerOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Point the viewer at `target`. A different target starts from scratch,
    /// with the event date filter set from `options.date_default`.
    pub fn open(&mut self, target: Option<i64>, today: NaiveDate) {
        if target.is_some() && self.target == target {
            return;
        }
        let options = self.options;
        *self = Self::new(options);
        self.target = target;
        self.event_date = match options.date_default {
            DateDefault::Unset => None,
            DateDefault::Today => Some(today),
        };
    }

    /// Keys that must be fetched now, marking each slot as in flight.
    pub fn plan(&mut self) -> Vec<QueryKey> {
        let Some(user_id) = self.target else {
            return Vec::new();
        };
        let mut keys = Vec::new();

        if self.directory.want(QueryKey::Users) {
            keys.push(QueryKey::Users);
        }
        let groups_key = QueryKey::Groups { user_id };
        if self.groups.want(groups_key) {
            keys.push(groups_key);
        }

        if !self.groups.value().is_some_and(|groups| !groups.is_empty()) {
            return keys;
        }

        let messages_key = QueryKey::Messages { user_id };
        if self.messages.want(messages_key) {
            keys.push(messages_key);
        }
        let events_key = QueryKey::Events { user_id, date: self.event_date };
        if self.events.want(events_key) {
            keys.push(events_key);
        }
        let stats_key = QueryKey::Stats { user_id, group_id: self.selected_group };
        if self.stats.want(stats_key) {
            keys.push(stats_key);
        }
        match self.selected_group {
            Some(group_id) => {
                let thread_key = QueryKey::Thread { user_id, group_id };
                if self.thread.want(thread_key) {
                    keys.push(thread_key);
                }
            }
            None => self.thread.reset(),
        }
        keys
    }

    /// Store a response. Returns `false` when it was stale or mismatched.
    pub fn apply(&mut self, key: QueryKey, payload: Payload) -> bool {
        match (key, payload) {
            (QueryKey::Users, Payload::Users(result)) => self.directory.resolve(&key, result),
            (QueryKey::Groups { .. }, Payload::Groups(result)) => self.groups.resolve(&key, result),
            (QueryKey::Messages { .. }, Payload::Messages(result)) => self.messages.resolve(&key, result),
            (QueryKey::Thread { .. }, Payload::Messages(result)) => self.thread.resolve(&key, result),
            (QueryKey::Events { .. }, Payload::Events(result)) => self.events.resolve(&key, result),
            (QueryKey::Stats { .. }, Payload::Stats(result)) => self.stats.resolve(&key, result),
            _ => false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ViewerPhase {
        if self.target.is_none() {
            return ViewerPhase::Disabled;
        }
        if let Some(err) = self.groups.error() {
            return ViewerPhase::Failed(err.to_owned());
        }
        match self.groups.value() {
            None => ViewerPhase::LoadingGroups,
            Some(groups) if groups.is_empty() => ViewerPhase::Empty,
            Some(_) => ViewerPhase::Ready,
        }
    }

    /// Route a group-list interaction. Selection re-scopes the view; add and
    /// delete never reach the server and raise a blocking explanation instead.
    pub fn handle_group_action(&mut self, action: GroupListAction) -> Option<&'static str> {
        match action {
            GroupListAction::Select(group_id) => {
                self.selected_group = group_id;
                None
            }
            GroupListAction::Add => {
                self.blocked = Some(READ_ONLY_ADD);
                self.blocked
            }
            GroupListAction::Delete(_) => {
                self.blocked = Some(READ_ONLY_DELETE);
                self.blocked
            }
        }
    }

    pub fn dismiss_blocked(&mut self) {
        self.blocked = None;
    }

    pub fn set_event_date(&mut self, date: Option<NaiveDate>) {
        self.event_date = date;
    }

    /// The inspected user's record from the full user list.
    #[must_use]
    pub fn identity(&self) -> Option<&User> {
        let target = self.target?;
        self.directory.value()?.iter().find(|u| u.id == target)
    }

    /// Groups with last-message preview derived from the bulk message page.
    #[must_use]
    pub fn group_summaries(&self) -> Vec<GroupSummary> {
        let Some(groups) = self.groups.value() else {
            return Vec::new();
        };
        let messages = self.messages.value().map_or(&[][..], Vec::as_slice);
        groups
            .iter()
            .map(|group| {
                let last = messages
                    .iter()
                    .filter(|m| m.group_id == group.id)
                    .max_by(|a, b| compare_timestamps(&a.timestamp, &b.timestamp));
                GroupSummary {
                    id: group.id,
                    name: group.name.clone(),
                    last_message: last.map(|m| truncate_preview(&m.content, PREVIEW_CHARS)),
                    last_message_time: last.map(|m| m.timestamp.clone()),
                    unread_count: 0,
                }
            })
            .collect()
    }

    /// Messages of the selected group in chronological order; empty when no
    /// group is selected or its thread has not arrived.
    #[must_use]
    pub fn thread(&self) -> Vec<Message> {
        if self.selected_group.is_none() {
            return Vec::new();
        }
        let mut messages = self.thread.value().cloned().unwrap_or_default();
        messages.sort_by(|a, b| compare_timestamps(&a.timestamp, &b.timestamp));
        messages
    }

    /// Analytics for the current scope (selected group, or all groups).
    #[must_use]
    pub fn analytics(&self) -> Analytics {
        let inline = self.inline_analytics();
        match (self.options.analytics, self.stats.value().and_then(|s| s.analytics.as_ref())) {
            (AnalyticsSource::Server, Some(server)) => Analytics {
                total_members: server.total_members,
                joins: server.join_count,
                leaves: server.leave_count,
                messages: server.message_count,
                active_users: server.active_users,
                certificates: server.certificate_count,
            },
            _ => inline,
        }
    }

    fn scoped_messages(&self) -> Vec<&Message> {
        match self.selected_group {
            Some(group_id) => match self.thread.value() {
                Some(thread) => thread.iter().collect(),
                None => self
                    .messages
                    .value()
                    .map(|all| all.iter().filter(|m| m.group_id == group_id).collect())
                    .unwrap_or_default(),
            },
            None => self.messages.value().map(|all| all.iter().collect()).unwrap_or_default(),
        }
    }

    fn inline_analytics(&self) -> Analytics {
        let events = self.events.value().map_or(&[][..], Vec::as_slice);
        let in_scope = |e: &&Event| self.selected_group.is_none_or(|g| e.group_id == g);
        let count = |kind: EventType| to_i64(events.iter().filter(in_scope).filter(|e| e.event_type == kind).count());

        let local = self.scoped_messages();
        let local_count = to_i64(local.len());
        let senders = local.iter().map(|m| m.sender.as_str()).collect::<HashSet<_>>();

        let stats = self.stats.value();
        let (total_members, messages) = match (self.selected_group, stats) {
            (Some(group_id), Some(stats)) => match stats.for_group(group_id) {
                Some(entry) => (entry.member_count, entry.message_count),
                None => (stats.total_members, local_count),
            },
            (None, Some(stats)) => (stats.total_members, stats.total_messages),
            (_, None) => (0, local_count),
        };

        Analytics {
            total_members,
            joins: count(EventType::Join),
            leaves: count(EventType::Leave),
            messages,
            active_users: to_i64(senders.len()),
            certificates: count(EventType::Certificate),
        }
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Perform the remote read named by `key`.
pub async fn fetch<A: AdminApi>(api: &A, key: QueryKey) -> Payload {
    match key {
        QueryKey::Users => Payload::Users(api.list_users().await),
        QueryKey::Groups { user_id } => Payload::Groups(api.user_groups(user_id).await),
        QueryKey::Messages { user_id } => {
            let query = MessageQuery { group_id: None, limit: BULK_MESSAGE_LIMIT, offset: 0 };
            Payload::Messages(api.user_messages(user_id, query).await)
        }
        QueryKey::Thread { user_id, group_id } => {
            let query = MessageQuery { group_id: Some(group_id), limit: THREAD_MESSAGE_LIMIT, offset: 0 };
            Payload::Messages(api.user_messages(user_id, query).await)
        }
        QueryKey::Events { user_id, date } => {
            let query = EventQuery { date, limit: EVENT_LIMIT, offset: 0 };
            Payload::Events(api.user_events(user_id, query).await)
        }
        QueryKey::Stats { user_id, group_id } => Payload::Stats(api.user_stats(user_id, group_id).await),
    }
}
