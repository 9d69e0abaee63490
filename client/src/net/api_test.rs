use super::*;

// =============================================================
// Endpoints
// =============================================================

#[test]
fn user_scoped_endpoints_format_expected_paths() {
    assert_eq!(user_endpoint(5), "/api/admin/users/5");
    assert_eq!(admin_flag_endpoint(5), "/api/admin/users/5/admin");
    assert_eq!(groups_endpoint(5), "/api/admin/users/5/groups");
}

#[test]
fn messages_endpoint_includes_group_scope_only_when_set() {
    let bulk = MessageQuery { group_id: None, limit: 100, offset: 0 };
    assert_eq!(messages_endpoint(3, &bulk), "/api/admin/users/3/messages?limit=100&offset=0");

    let scoped = MessageQuery { group_id: Some(9), limit: 500, offset: 20 };
    assert_eq!(
        messages_endpoint(3, &scoped),
        "/api/admin/users/3/messages?limit=500&offset=20&group_id=9"
    );
}

#[test]
fn events_endpoint_formats_date_filter_as_iso_day() {
    let undated = EventQuery { date: None, limit: 1000, offset: 0 };
    assert_eq!(events_endpoint(3, &undated), "/api/admin/users/3/events?limit=1000&offset=0");

    let dated = EventQuery { date: NaiveDate::from_ymd_opt(2025, 2, 7), limit: 1000, offset: 0 };
    assert_eq!(
        events_endpoint(3, &dated),
        "/api/admin/users/3/events?limit=1000&offset=0&date=2025-02-07"
    );
}

#[test]
fn stats_endpoint_scopes_by_group_when_present() {
    assert_eq!(stats_endpoint(3, None), "/api/admin/users/3/stats");
    assert_eq!(stats_endpoint(3, Some(4)), "/api/admin/users/3/stats?group_id=4");
}

// =============================================================
// Envelope
// =============================================================

#[test]
fn check_envelope_accepts_success_body() {
    let body = serde_json::json!({ "success": true, "users": [] });
    assert_eq!(check_envelope(200, Some(body.clone())), Ok(body));
}

#[test]
fn check_envelope_falls_back_to_status_when_flag_missing() {
    assert!(check_envelope(200, Some(serde_json::json!({ "users": [] }))).is_ok());
    assert_eq!(
        check_envelope(500, Some(serde_json::json!({}))),
        Err(ApiError::Server(None))
    );
}

#[test]
fn check_envelope_surfaces_server_error_message() {
    let body = serde_json::json!({ "success": false, "error": "Cannot delete the last admin" });
    assert_eq!(
        check_envelope(400, Some(body)),
        Err(ApiError::Server(Some("Cannot delete the last admin".to_owned())))
    );
}

#[test]
fn check_envelope_treats_false_flag_as_failure_even_on_ok_status() {
    let body = serde_json::json!({ "success": false, "message": "nope" });
    assert_eq!(check_envelope(200, Some(body)), Err(ApiError::Server(Some("nope".to_owned()))));
}

#[test]
fn check_envelope_without_body_is_transport_failure() {
    assert!(matches!(check_envelope(502, None), Err(ApiError::Transport(_))));
}

#[test]
fn take_field_decodes_payload_and_reports_missing_field() {
    let mut body = serde_json::json!({
        "success": true,
        "groups": [{ "id": 1, "name": "Family" }]
    });
    let groups: Vec<Group> = take_field(&mut body, "groups").unwrap();
    assert_eq!(groups, vec![Group { id: 1, name: "Family".to_owned() }]);

    let missing = take_field::<Vec<Group>>(&mut serde_json::json!({ "success": true }), "groups");
    assert_eq!(missing, Err(ApiError::Transport("missing field `groups`".to_owned())));
}

#[test]
fn confirmation_message_reads_optional_message() {
    assert_eq!(
        confirmation_message(&serde_json::json!({ "success": true, "message": "You are now an admin" })),
        Some("You are now an admin".to_owned())
    );
    assert_eq!(confirmation_message(&serde_json::json!({ "success": true })), None);
}

// =============================================================
// ApiError
// =============================================================

#[test]
fn notice_text_prefers_server_message() {
    let err = ApiError::Server(Some("User not found".to_owned()));
    assert_eq!(err.notice_text(), "User not found");
}

#[test]
fn notice_text_falls_back_to_generic_text() {
    assert_eq!(ApiError::Server(None).notice_text(), GENERIC_FAILURE);
    assert_eq!(ApiError::Server(Some("   ".to_owned())).notice_text(), GENERIC_FAILURE);
    assert_eq!(ApiError::Transport("connection reset".to_owned()).notice_text(), GENERIC_FAILURE);
}

#[test]
fn api_error_display_uses_message_or_generic_text() {
    assert_eq!(ApiError::Server(Some("boom".to_owned())).to_string(), "boom");
    assert_eq!(ApiError::Server(None).to_string(), GENERIC_FAILURE);
    assert_eq!(ApiError::Transport("offline".to_owned()).to_string(), "request failed: offline");
}

// =============================================================
// HttpApi off-browser
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_api_without_browser_reports_transport_failure() {
    let api = HttpApi::new(Some("token".to_owned()));
    let result = futures::executor::block_on(api.list_users());
    assert_eq!(result, Err(ApiError::Transport("not available on server".to_owned())));
}
