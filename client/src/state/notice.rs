//! Transient notification queue shared by every screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once via context; pages push outcomes of fetches and mutations,
//! `NoticeStack` renders and expires them.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

/// Maximum number of notices shown at once; the oldest is evicted first.
pub const NOTICE_CAP: usize = 5;

/// How long a notice stays on screen before auto-dismissal.
pub const NOTICE_TTL_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    /// CSS modifier suffix for this kind.
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Notification content before it is queued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, title: title.into(), body: body.into() }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, title: title.into(), body: body.into() }
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, title: title.into(), body: body.into() }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, title: title.into(), body: body.into() }
    }
}

/// A queued notice with its dismissal handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedNotice {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub items: Vec<QueuedNotice>,
    next_id: u64,
}

impl NoticeState {
    /// Queue a notice and return its id.
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        if self.items.len() >= NOTICE_CAP {
            self.items.remove(0);
        }
        self.items.push(QueuedNotice { id, notice });
        id
    }

    /// Remove the notice with `id`. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|item| item.id != id);
    }
}
