//! Product CRUD semantics, including the media merge paths.

use bazaar::data::Media;
use bazaar::products::{CreateProduct, UpdateProduct};

use crate::helpers::test_app;

fn media(id: &str, uri: &str, mimetype: &str) -> Media {
    Media {
        id: Some(id.to_string()),
        uri: Some(uri.to_string()),
        mimetype: Some(mimetype.to_string()),
        ..Default::default()
    }
}

fn create(title: &str) -> CreateProduct {
    CreateProduct {
        category: "cat-1".to_string(),
        sub_category: None,
        title: title.to_string(),
        description: "A thing".to_string(),
        price: 10.0,
        stock: 5,
        images: None,
        videos: None,
        is_featured: false,
        tags: vec!["red".to_string()],
        variations: vec![],
    }
}

#[test]
fn create_generates_slug_and_defaults() {
    let app = test_app();
    let stored = app.state.products.create(create("Boots"), "seller-1").unwrap();
    assert_eq!(stored.doc.slug.len(), 8);
    assert_eq!(stored.doc.seller, "seller-1");
    assert_eq!(stored.doc.view_count, 0);
}

#[test]
fn negative_price_is_rejected() {
    let app = test_app();
    let mut data = create("Bad");
    data.price = -1.0;
    let err = app.state.products.create(data, "seller-1").unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn images_reconcile_deeply() {
    let app = test_app();
    let mut data = create("Camera");
    data.images = Some(vec![
        media("m1", "https://cdn.example/a.png", "image/png"),
        media("m2", "https://cdn.example/b.png", "image/png"),
    ]);
    let stored = app.state.products.create(data, "seller-1").unwrap();

    // Patch mentions m1 (new uri, no mimetype) and a new m3; m2 is absent.
    let updated = app
        .state
        .products
        .update(
            &stored.id,
            &UpdateProduct {
                images: Some(vec![
                    Media {
                        id: Some("m1".to_string()),
                        uri: Some("https://cdn.example/a2.png".to_string()),
                        ..Default::default()
                    },
                    media("m3", "https://cdn.example/c.png", "image/png"),
                ]),
                ..Default::default()
            },
            "seller-1",
        )
        .unwrap();

    let images = updated.doc.images.unwrap();
    assert_eq!(images.len(), 2);
    // Matched item merged field-wise: the mimetype the patch omitted survives.
    assert_eq!(images[0].uri.as_deref(), Some("https://cdn.example/a2.png"));
    assert_eq!(images[0].mimetype.as_deref(), Some("image/png"));
    // m2 was dropped, m3 appended.
    assert_eq!(images[1].id.as_deref(), Some("m3"));
}

#[test]
fn videos_merge_by_identity() {
    let app = test_app();
    let mut data = create("Drone");
    data.videos = Some(vec![media("v1", "https://cdn.example/v.mp4", "video/mp4")]);
    let stored = app.state.products.create(data, "seller-1").unwrap();

    // Identity array merge replaces matched items wholesale and keeps the rest.
    let updated = app
        .state
        .products
        .update(
            &stored.id,
            &UpdateProduct {
                videos: Some(vec![Media {
                    id: Some("v1".to_string()),
                    uri: Some("https://cdn.example/v2.mp4".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            "seller-1",
        )
        .unwrap();

    let videos = updated.doc.videos.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].uri.as_deref(), Some("https://cdn.example/v2.mp4"));
    // Wholesale replacement: the omitted mimetype is gone.
    assert_eq!(videos[0].mimetype, None);
}

#[test]
fn tags_replace_wholesale() {
    let app = test_app();
    let stored = app.state.products.create(create("Hat"), "seller-1").unwrap();

    let updated = app
        .state
        .products
        .update(
            &stored.id,
            &UpdateProduct {
                tags: Some(vec!["blue".to_string(), "wool".to_string()]),
                ..Default::default()
            },
            "seller-1",
        )
        .unwrap();
    assert_eq!(updated.doc.tags, vec!["blue", "wool"]);
}

#[test]
fn soft_deleted_product_reads_as_missing() {
    let app = test_app();
    let stored = app.state.products.create(create("Gone"), "seller-1").unwrap();

    app.state
        .products
        .update(
            &stored.id,
            &UpdateProduct {
                is_active: Some(false),
                ..Default::default()
            },
            "seller-1",
        )
        .unwrap();

    // Deactivation is not deletion; still findable.
    app.state.products.find_one(&stored.id).unwrap();
}

#[test]
fn count_excludes_nothing_until_deleted() {
    let app = test_app();
    app.state.products.create(create("One"), "s").unwrap();
    app.state.products.create(create("Two"), "s").unwrap();
    assert_eq!(app.state.products.count().unwrap(), 2);
}
