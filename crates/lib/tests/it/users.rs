//! Registration, verification, and password flows.

use bazaar::constants::{EMAIL_PROOF_TTL_MILLIS, OTP_TTL_MILLIS};
use bazaar::users::CreateUser;

use crate::helpers::{register, test_app};

fn create(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password: "correct horse".to_string(),
        first_name: None,
        last_name: None,
    }
}

#[test]
fn register_lowercases_email_and_creates_profile() {
    let app = test_app();
    let stored = app
        .state
        .users
        .register(CreateUser {
            email: "MixedCase@Example.COM".to_string(),
            password: "pw".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
        })
        .unwrap();

    assert_eq!(stored.doc.email, "mixedcase@example.com");
    assert!(stored.doc.otp.is_some());
    assert!(stored.doc.email_proof_token.is_some());
    assert!(!stored.doc.is_verified);

    let profile = app.state.profiles.find_by_user(&stored.id).unwrap();
    assert_eq!(profile.doc.first_name.as_deref(), Some("Ada"));
}

#[test]
fn duplicate_email_is_rejected() {
    let app = test_app();
    app.state.users.register(create("dup@example.com")).unwrap();
    let err = app
        .state
        .users
        .register(create("DUP@example.com"))
        .unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn verify_by_otp() {
    let app = test_app();
    let stored = app.state.users.register(create("otp@example.com")).unwrap();
    let otp = stored.doc.otp.unwrap();

    let err = app
        .state
        .users
        .verify_by_otp("otp@example.com", otp.wrapping_add(1))
        .unwrap_err();
    assert!(err.is_validation_error());

    let verified = app
        .state
        .users
        .verify_by_otp("otp@example.com", otp)
        .unwrap();
    assert!(verified.doc.is_verified);
}

#[test]
fn expired_otp_is_rejected() {
    let app = test_app();
    let stored = app
        .state
        .users
        .register(create("otp-expired@example.com"))
        .unwrap();
    let otp = stored.doc.otp.unwrap();

    app.clock.advance(OTP_TTL_MILLIS + 1);
    let err = app
        .state
        .users
        .verify_by_otp("otp-expired@example.com", otp)
        .unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn verify_by_token() {
    let app = test_app();
    let stored = app
        .state
        .users
        .register(create("token@example.com"))
        .unwrap();
    let token = stored.doc.email_proof_token.unwrap();

    let verified = app.state.users.verify_by_token(&token).unwrap();
    assert!(verified.doc.is_verified);
}

#[test]
fn token_reissue_is_rate_limited() {
    let app = test_app();
    app.state
        .users
        .register(create("reissue@example.com"))
        .unwrap();

    // Immediately asking again is too soon.
    let err = app
        .state
        .users
        .regenerate_verification("reissue@example.com")
        .unwrap_err();
    assert!(err.is_validation_error() || err.to_string().contains("1 minute"));

    // After the gap a fresh token is issued.
    app.clock.advance(2 * 60 * 1000);
    app.state
        .users
        .regenerate_verification("reissue@example.com")
        .unwrap();
}

#[test]
fn forgot_password_flow() {
    let app = test_app();
    app.state
        .users
        .register(create("forgot@example.com"))
        .unwrap();

    app.state
        .users
        .password_reset_token("forgot@example.com")
        .unwrap();
    let token = app
        .state
        .users
        .find_by_email("forgot@example.com")
        .unwrap()
        .unwrap()
        .doc
        .password_reset_token
        .unwrap();

    // Reusing the current password is refused.
    let err = app
        .state
        .users
        .forgot_password(&token, "correct horse")
        .unwrap_err();
    assert!(err.to_string().contains("lready used"));

    app.state.users.forgot_password(&token, "new phrase").unwrap();
    app.state
        .auth
        .login("forgot@example.com", "new phrase", None)
        .unwrap();
}

#[test]
fn expired_reset_token_is_rejected() {
    let app = test_app();
    app.state
        .users
        .register(create("reset-expired@example.com"))
        .unwrap();
    app.state
        .users
        .password_reset_token("reset-expired@example.com")
        .unwrap();
    let token = app
        .state
        .users
        .find_by_email("reset-expired@example.com")
        .unwrap()
        .unwrap()
        .doc
        .password_reset_token
        .unwrap();

    app.clock.advance(EMAIL_PROOF_TTL_MILLIS + 1);
    let err = app.state.users.forgot_password(&token, "xyz").unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn reset_password_checks_current() {
    let app = test_app();
    let id = register(&app, "reset@example.com");

    let err = app
        .state
        .users
        .reset_password(&id, "wrong", "next")
        .unwrap_err();
    assert!(err.to_string().contains("not matched"));

    let err = app
        .state
        .users
        .reset_password(&id, "correct horse", "correct horse")
        .unwrap_err();
    assert!(err.to_string().contains("lready used"));

    app.state
        .users
        .reset_password(&id, "correct horse", "next phrase")
        .unwrap();
    app.state
        .auth
        .login("reset@example.com", "next phrase", None)
        .unwrap();
}

#[test]
fn find_joins_profile() {
    let app = test_app();
    let id = register(&app, "joined@example.com");
    let view = app.state.users.find(&id).unwrap();
    assert_eq!(view.email, "joined@example.com");
    let profile = view.profile.expect("profile is joined");
    assert_eq!(profile.first_name.as_deref(), Some("Test"));
}
