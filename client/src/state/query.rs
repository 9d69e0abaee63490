//! Keyed fetch slots with last-write-wins staleness.
//!
//! DESIGN
//! ======
//! Every remote read is identified by a [`QueryKey`] naming the entity type and
//! the scope parameters it was issued with. A [`Slot`] remembers the key it
//! currently wants; a response is applied only if it was issued for that key.
//! Superseded requests are never cancelled, their responses are simply dropped
//! on arrival. A change of selection therefore invalidates exactly the slots
//! whose keys depend on it.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use chrono::NaiveDate;

use crate::net::api::ApiResult;

/// Identity of one remote read: entity type plus scope parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Full user list.
    Users,
    /// Groups owned by a user.
    Groups { user_id: i64 },
    /// Bounded page of recent messages across all of a user's groups.
    Messages { user_id: i64 },
    /// Full thread of one group.
    Thread { user_id: i64, group_id: i64 },
    /// Timeline events, optionally restricted to one day.
    Events { user_id: i64, date: Option<NaiveDate> },
    /// Aggregate statistics, optionally scoped to one group.
    Stats { user_id: i64, group_id: Option<i64> },
}

/// Cached result of the most recently wanted query of one kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot<T> {
    key: Option<QueryKey>,
    value: Option<T>,
    pending: bool,
    error: Option<String>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { key: None, value: None, pending: false, error: None }
    }
}

impl<T> Slot<T> {
    /// Declare `key` as the wanted query.
    ///
    /// Returns `true` when the caller must issue the request: the key changed,
    /// or nothing is cached, failed or in flight. A changed key discards the
    /// previous value and error. A failed key is not retried until `reset`.
    pub fn want(&mut self, key: QueryKey) -> bool {
        if self.key == Some(key) {
            if self.pending || self.value.is_some() || self.error.is_some() {
                return false;
            }
        } else {
            self.key = Some(key);
            self.value = None;
            self.error = None;
        }
        self.pending = true;
        true
    }

    /// Apply a response issued for `key`.
    ///
    /// Returns `false` and leaves the slot untouched when `key` is no longer
    /// the wanted key.
    pub fn resolve(&mut self, key: &QueryKey, result: ApiResult<T>) -> bool {
        if self.key.as_ref() != Some(key) {
            return false;
        }
        self.pending = false;
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(err) => self.error = Some(err.notice_text()),
        }
        true
    }

    /// Forget the wanted key and any cached data.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn key(&self) -> Option<&QueryKey> {
        self.key.as_ref()
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
