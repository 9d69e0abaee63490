use super::*;
use serde_json::json;

#[test]
fn envelope_passes_successful_body_through() {
    let body = json!({ "success": true, "users": [] });
    let value = check_envelope("GET /api/admin/users", 200, body.clone()).unwrap();
    assert_eq!(value, body);
}

#[test]
fn envelope_without_flag_uses_status() {
    assert!(check_envelope("GET /x", 204, json!({})).is_ok());
    let err = check_envelope("GET /x", 500, Value::Null).unwrap_err();
    assert!(matches!(err, CliError::Api { ref message, .. } if message == "HTTP 500"));
}

#[test]
fn envelope_failure_prefers_error_over_message() {
    let body = json!({ "success": false, "error": "Admin only", "message": "ignored" });
    let err = check_envelope("PUT /api/admin/users/3/admin", 200, body).unwrap_err();
    assert_eq!(err.to_string(), "server rejected PUT /api/admin/users/3/admin: Admin only");
}

#[test]
fn envelope_failure_falls_back_to_message() {
    let body = json!({ "success": false, "message": "Already admin" });
    let err = check_envelope("POST /api/admin/make-me-admin", 400, body).unwrap_err();
    assert!(matches!(err, CliError::Api { ref message, .. } if message == "Already admin"));
}

#[test]
fn delete_refuses_own_account_even_when_confirmed() {
    assert!(matches!(check_delete_allowed(7, Some(7), true), Err(CliError::SelfDelete)));
}

#[test]
fn delete_requires_confirmation() {
    assert!(matches!(check_delete_allowed(8, Some(7), false), Err(CliError::NotConfirmed(8))));
    assert!(check_delete_allowed(8, Some(7), true).is_ok());
    assert!(check_delete_allowed(8, None, true).is_ok());
}

#[test]
fn actor_id_reads_wrapped_or_bare_user() {
    assert_eq!(actor_id(&json!({ "success": true, "user": { "id": 5 } })), Some(5));
    assert_eq!(actor_id(&json!({ "id": "12" })), Some(12));
    assert_eq!(actor_id(&json!({ "success": true })), None);
}

#[test]
fn connected_filter_keeps_linked_users_only() {
    let users = json!([
        { "id": 1, "whatsapp_connected": true },
        { "id": 2, "whatsapp_connected": false },
        { "id": 3, "whatsappConnected": true },
        { "id": 4 }
    ]);
    let ids = connected_only(users)
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn message_and_event_paths_carry_optional_filters() {
    assert_eq!(messages_path(4, None, 100, 0), "/api/admin/users/4/messages?limit=100&offset=0");
    assert_eq!(
        messages_path(4, Some(9), 500, 20),
        "/api/admin/users/4/messages?limit=500&offset=20&group_id=9"
    );
    assert_eq!(
        events_path(4, NaiveDate::from_ymd_opt(2024, 3, 1), 1000, 0),
        "/api/admin/users/4/events?limit=1000&offset=0&date=2024-03-01"
    );
}

#[test]
fn date_validation_rejects_malformed_input() {
    assert_eq!(validate_date("2024-03-01").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(validate_date("2024-02-29").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    for raw in [
        "2024-3-01",
        "2024-13-01",
        "2024-01-32",
        "2024-02-31",
        "2023-02-29",
        "today",
        "2024-01-01-02",
        "abcd-01-01",
    ] {
        assert!(matches!(validate_date(raw), Err(CliError::InvalidDate(_))), "{raw}");
    }
}

#[test]
fn next_steps_point_at_login_and_directory() {
    let text = next_steps("http://localhost:3000/");
    assert!(text.contains("Log out"));
    assert!(text.contains("http://localhost:3000/login"));
    assert!(text.ends_with("http://localhost:3000/"));
}

#[test]
fn display_name_prefers_username() {
    assert_eq!(display_name(&json!({ "username": "ana", "email": "a@x.io" })), "ana");
    assert_eq!(display_name(&json!({ "email": "a@x.io" })), "a@x.io");
    assert_eq!(display_name(&Value::Null), "user");
}

#[test]
fn cli_parses_users_and_inspect_commands() {
    let cli = Cli::try_parse_from(["admin-cli", "--token", "t", "users", "set-admin", "3", "false"]).unwrap();
    assert_eq!(cli.token.as_deref(), Some("t"));
    assert!(matches!(
        cli.command,
        Command::Users(UsersCommand { command: UsersSubcommand::SetAdmin { user_id: 3, is_admin: false } })
    ));

    let cli = Cli::try_parse_from(["admin-cli", "inspect", "events", "4", "--date", "2024-03-01"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Inspect(InspectCommand {
            command: InspectSubcommand::Events { user_id: 4, limit: DEFAULT_EVENT_LIMIT, offset: 0, .. }
        })
    ));
}
