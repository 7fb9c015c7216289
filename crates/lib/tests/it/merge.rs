//! The merge engine's observable contract, exercised through the services
//! that consume it.

use bazaar::data::{GeoLocation, Media, Mobile, SocialLink, SocialPlatform};
use bazaar::users::UpdateUserProfile;

use crate::helpers::{register, test_app};

#[test]
fn profile_nested_object_merges_field_wise() {
    let app = test_app();
    let user = register(&app, "merge-nested@example.com");

    app.state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                location: Some(GeoLocation {
                    city: Some("Lisbon".into()),
                    zip_code: Some("1000".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    // A second patch touching only the city must keep the zip code.
    let stored = app
        .state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                location: Some(GeoLocation {
                    city: Some("Porto".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    let location = stored.doc.location.unwrap();
    assert_eq!(location.city.as_deref(), Some("Porto"));
    assert_eq!(location.zip_code.as_deref(), Some("1000"));
}

#[test]
fn deletion_marker_clears_nested_object() {
    let app = test_app();
    let user = register(&app, "merge-clear@example.com");

    app.state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                mobile: Some(Mobile {
                    country_code: Some("+1".into()),
                    mobile: Some("5551234".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    let stored = app
        .state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                mobile: Some(Mobile {
                    is_deleted: true,
                    ..Default::default()
                }),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    // The marker collapses the sub-document to empty.
    let mobile = stored.doc.mobile.unwrap();
    assert_eq!(mobile.country_code, None);
    assert_eq!(mobile.mobile, None);
}

#[test]
fn socials_reconcile_by_identity() {
    let app = test_app();
    let user = register(&app, "merge-socials@example.com");

    let link = |id: &str, platform, url: &str| SocialLink {
        id: Some(id.to_string()),
        platform,
        url: url.to_string(),
        is_deleted: false,
    };

    app.state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                socials: Some(vec![
                    link("s1", SocialPlatform::Facebook, "https://fb.example/a"),
                    link("s2", SocialPlatform::Youtube, "https://yt.example/a"),
                ]),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    // Replace s1, delete s2, append one without an id.
    let stored = app
        .state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                socials: Some(vec![
                    link("s1", SocialPlatform::Facebook, "https://fb.example/b"),
                    SocialLink {
                        id: Some("s2".to_string()),
                        platform: SocialPlatform::Youtube,
                        url: String::new(),
                        is_deleted: true,
                    },
                    SocialLink {
                        id: None,
                        platform: SocialPlatform::Twitter,
                        url: "https://tw.example/new".to_string(),
                        is_deleted: false,
                    },
                ]),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    let socials = stored.doc.socials.unwrap();
    assert_eq!(socials.len(), 2);
    assert_eq!(socials[0].id.as_deref(), Some("s1"));
    assert_eq!(socials[0].url, "https://fb.example/b");
    assert_eq!(socials[1].url, "https://tw.example/new");
}

#[test]
fn update_stamps_audit_metadata() {
    let app = test_app();
    let user = register(&app, "merge-audit@example.com");

    app.clock.set(1_999_000_000_000);
    let stored = app
        .state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                bio: Some("hello".into()),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    assert_eq!(stored.doc.audit.u_by.as_deref(), Some(user.as_str()));
    assert_eq!(stored.doc.audit.u_time, Some(1_999_000_000_000));
}

#[test]
fn profile_picture_survives_unrelated_patch() {
    let app = test_app();
    let user = register(&app, "merge-preserve@example.com");

    app.state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                profile_pic: Some(Media {
                    uri: Some("https://cdn.example/me.png".into()),
                    mimetype: Some("image/png".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    let stored = app
        .state
        .profiles
        .update(
            &user,
            &UpdateUserProfile {
                bio: Some("unrelated".into()),
                ..Default::default()
            },
            &user,
        )
        .unwrap();

    assert_eq!(
        stored.doc.profile_pic.unwrap().uri.as_deref(),
        Some("https://cdn.example/me.png")
    );
}
