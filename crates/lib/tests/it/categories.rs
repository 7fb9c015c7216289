//! Category CRUD semantics.

use bazaar::categories::{CreateCategory, UpdateCategory};
use bazaar::data::{Media, PageQuery};

use crate::helpers::test_app;

fn create(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        parent_category: None,
        image: None,
    }
}

#[test]
fn duplicate_name_is_rejected() {
    let app = test_app();
    app.state.categories.create(create("Shoes"), "admin").unwrap();
    let err = app
        .state
        .categories
        .create(create("Shoes"), "admin")
        .unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn update_merges_and_image_clears_on_marker() {
    let app = test_app();
    let stored = app
        .state
        .categories
        .create(
            CreateCategory {
                name: "Books".to_string(),
                parent_category: None,
                image: Some(Media {
                    uri: Some("https://cdn.example/books.png".into()),
                    mimetype: Some("image/png".into()),
                    ..Default::default()
                }),
            },
            "admin",
        )
        .unwrap();

    // Rename without touching the image.
    let updated = app
        .state
        .categories
        .update(
            &stored.id,
            &UpdateCategory {
                name: Some("Paper Books".to_string()),
                ..Default::default()
            },
            "admin",
        )
        .unwrap();
    assert_eq!(updated.doc.name, "Paper Books");
    assert_eq!(
        updated.doc.image.as_ref().and_then(|m| m.uri.as_deref()),
        Some("https://cdn.example/books.png")
    );

    // A deletion-marked image patch clears the sub-document.
    let cleared = app
        .state
        .categories
        .update(
            &stored.id,
            &UpdateCategory {
                image: Some(Media {
                    is_deleted: true,
                    ..Default::default()
                }),
                ..Default::default()
            },
            "admin",
        )
        .unwrap();
    let image = cleared.doc.image.unwrap();
    assert_eq!(image.uri, None);
    assert_eq!(image.mimetype, None);
}

#[test]
fn soft_delete_hides_category() {
    let app = test_app();
    let stored = app
        .state
        .categories
        .create(create("Ephemeral"), "admin")
        .unwrap();

    app.state.categories.delete(&stored.id, "admin").unwrap();

    let err = app.state.categories.find_one(&stored.id).unwrap_err();
    assert!(err.is_not_found());

    let listed = app
        .state
        .categories
        .find_all(&PageQuery::default())
        .unwrap();
    assert!(listed.data.iter().all(|c| c.id != stored.id));

    // Visible again when the caller opts into deleted records.
    let all = app
        .state
        .categories
        .find_all(&PageQuery {
            no_condition: true,
            ..Default::default()
        })
        .unwrap();
    assert!(all.data.iter().any(|c| c.id == stored.id));
}

#[test]
fn pagination_slices_and_counts() {
    let app = test_app();
    for i in 0..5 {
        app.state
            .categories
            .create(create(&format!("Cat {i}")), "admin")
            .unwrap();
    }

    let page = app
        .state
        .categories
        .find_all(&PageQuery {
            limit: Some(2),
            skip: Some(2),
            pagination: true,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].doc.name, "Cat 2");
    let info = page.pagination.unwrap();
    assert_eq!(info.total, 5);
    assert_eq!(info.limit, 2);
    assert_eq!(info.skip, 2);
}
