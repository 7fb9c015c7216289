//! Login, access tokens, and expiry.

use bazaar::constants::ACCESS_TOKEN_TTL_MILLIS;
use bazaar::users::UpdateUser;

use crate::helpers::{register, register_admin, test_app};

#[test]
fn login_issues_a_working_token() {
    let app = test_app();
    let id = register(&app, "login@example.com");

    let session = app
        .state
        .auth
        .login("Login@example.com", "correct horse", None)
        .unwrap();
    assert_eq!(session.user.id, id);
    assert_eq!(session.user.first_name.as_deref(), Some("Test"));

    let identity = app.state.auth.authenticate(&session.token).unwrap();
    assert_eq!(identity.id, id);
    assert_eq!(identity.email, "login@example.com");
}

#[test]
fn wrong_password_is_unauthorized() {
    let app = test_app();
    register(&app, "wrongpw@example.com");
    let err = app
        .state
        .auth
        .login("wrongpw@example.com", "nope", None)
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn unknown_user_is_not_found() {
    let app = test_app();
    let err = app
        .state
        .auth
        .login("ghost@example.com", "pw", None)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn deactivated_account_cannot_login() {
    let app = test_app();
    let id = register(&app, "inactive@example.com");
    app.state
        .users
        .update(
            &id,
            &UpdateUser {
                is_active: Some(false),
                ..Default::default()
            },
            "harness",
        )
        .unwrap();

    let err = app
        .state
        .auth
        .login("inactive@example.com", "correct horse", None)
        .unwrap_err();
    assert!(err.is_permission_denied());
}

#[test]
fn admin_flag_mismatch_is_forbidden() {
    let app = test_app();
    register(&app, "plain@example.com");
    let err = app
        .state
        .auth
        .login("plain@example.com", "correct horse", Some(true))
        .unwrap_err();
    assert!(err.is_permission_denied());

    register_admin(&app, "boss@example.com");
    app.state
        .auth
        .login("boss@example.com", "correct horse", Some(true))
        .unwrap();
}

#[test]
fn token_expires() {
    let app = test_app();
    register(&app, "expiry@example.com");
    let session = app
        .state
        .auth
        .login("expiry@example.com", "correct horse", None)
        .unwrap();

    app.state.auth.authenticate(&session.token).unwrap();

    app.clock.advance(ACCESS_TOKEN_TTL_MILLIS + 1);
    let err = app.state.auth.authenticate(&session.token).unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn garbage_token_is_rejected() {
    let app = test_app();
    let err = app.state.auth.authenticate("not-a-token").unwrap_err();
    assert!(err.is_unauthorized());
}
