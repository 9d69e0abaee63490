use super::*;
use crate::net::api::ApiError;

fn groups_key(user_id: i64) -> QueryKey {
    QueryKey::Groups { user_id }
}

#[test]
fn fresh_slot_requests_fetch_once() {
    let mut slot = Slot::<Vec<i64>>::default();
    assert!(slot.want(groups_key(1)));
    assert!(slot.is_pending());
    assert!(!slot.want(groups_key(1)));
}

#[test]
fn resolve_stores_value_for_wanted_key() {
    let mut slot = Slot::<Vec<i64>>::default();
    slot.want(groups_key(1));
    assert!(slot.resolve(&groups_key(1), Ok(vec![4, 5])));
    assert_eq!(slot.value(), Some(&vec![4, 5]));
    assert!(!slot.is_pending());
    assert!(!slot.want(groups_key(1)));
}

#[test]
fn changing_key_discards_previous_value_and_refetches() {
    let mut slot = Slot::<Vec<i64>>::default();
    slot.want(groups_key(1));
    slot.resolve(&groups_key(1), Ok(vec![1]));

    assert!(slot.want(groups_key(2)));
    assert_eq!(slot.value(), None);
    assert_eq!(slot.key(), Some(&groups_key(2)));
}

#[test]
fn stale_response_is_ignored() {
    let mut slot = Slot::<Vec<i64>>::default();
    slot.want(QueryKey::Thread { user_id: 1, group_id: 10 });
    slot.want(QueryKey::Thread { user_id: 1, group_id: 11 });

    let applied = slot.resolve(&QueryKey::Thread { user_id: 1, group_id: 10 }, Ok(vec![100]));
    assert!(!applied);
    assert_eq!(slot.value(), None);
    assert!(slot.is_pending());

    assert!(slot.resolve(&QueryKey::Thread { user_id: 1, group_id: 11 }, Ok(vec![110])));
    assert_eq!(slot.value(), Some(&vec![110]));
}

#[test]
fn failure_records_notice_text_and_is_not_retried() {
    let mut slot = Slot::<Vec<i64>>::default();
    slot.want(QueryKey::Users);
    slot.resolve(&QueryKey::Users, Err(ApiError::Server(Some("forbidden".to_owned()))));
    assert_eq!(slot.error(), Some("forbidden"));
    assert_eq!(slot.value(), None);
    assert!(!slot.want(QueryKey::Users));
}

#[test]
fn reset_allows_refetch_of_same_key() {
    let mut slot = Slot::<Vec<i64>>::default();
    slot.want(QueryKey::Users);
    slot.resolve(&QueryKey::Users, Ok(vec![1, 2]));
    slot.reset();
    assert_eq!(slot.value(), None);
    assert!(slot.want(QueryKey::Users));
    slot.resolve(&QueryKey::Users, Err(ApiError::Transport("offline".to_owned())));
    assert_eq!(slot.error(), Some(crate::net::api::GENERIC_FAILURE));
}

#[test]
fn scoped_keys_differ_by_parameters() {
    let all = QueryKey::Stats { user_id: 1, group_id: None };
    let one = QueryKey::Stats { user_id: 1, group_id: Some(2) };
    assert_ne!(all, one);
    let today = QueryKey::Events { user_id: 1, date: NaiveDate::from_ymd_opt(2025, 1, 1) };
    let undated = QueryKey::Events { user_id: 1, date: None };
    assert_ne!(today, undated);
}
