use super::*;

fn admin() -> User {
    User {
        id: 1,
        username: "root".to_owned(),
        email: "root@example.com".to_owned(),
        is_admin: true,
        whatsapp_connected: false,
        created_at: None,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState::default();
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { loading: true, ..AuthState::default() };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let mut state = AuthState::default();
    state.sign_in("tok".to_owned(), admin());
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn cleared_session_redirects_again() {
    let mut state = AuthState::default();
    state.sign_in("tok".to_owned(), admin());
    state.clear();
    assert!(should_redirect_unauth(&state));
}
