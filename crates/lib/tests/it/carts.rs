//! Cart semantics: one active cart per user, totals, status.

use bazaar::carts::{CartStatus, LineItem, UpdateCart};

use crate::helpers::test_app;

#[test]
fn get_or_create_is_idempotent() {
    let app = test_app();
    let first = app.state.carts.get_or_create("u-1").unwrap();
    let second = app.state.carts.get_or_create("u-1").unwrap();
    assert_eq!(first.id, second.id);

    // A different user gets their own cart.
    let other = app.state.carts.get_or_create("u-2").unwrap();
    assert_ne!(first.id, other.id);
}

#[test]
fn upsert_bumps_quantity_and_recomputes_total() {
    let app = test_app();
    app.state.carts.upsert_item("u-1", "p-1", 2, 5.0).unwrap();
    let cart = app.state.carts.upsert_item("u-1", "p-1", 1, 5.0).unwrap();

    assert_eq!(cart.doc.items.len(), 1);
    assert_eq!(cart.doc.items[0].quantity, 3);
    assert_eq!(cart.doc.total_price, 15.0);

    let cart = app.state.carts.upsert_item("u-1", "p-2", 1, 2.5).unwrap();
    assert_eq!(cart.doc.items.len(), 2);
    assert_eq!(cart.doc.total_price, 17.5);
}

#[test]
fn zero_quantity_is_rejected() {
    let app = test_app();
    let err = app.state.carts.upsert_item("u-1", "p-1", 0, 5.0).unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn update_reconciles_lines_and_recomputes() {
    let app = test_app();
    let cart = app.state.carts.upsert_item("u-1", "p-1", 2, 5.0).unwrap();
    let line_id = cart.doc.items[0].id.clone().unwrap();

    // Replace the existing line's quantity, delete nothing, append a line.
    let updated = app
        .state
        .carts
        .update(
            &cart.id,
            &UpdateCart {
                items: Some(vec![
                    LineItem {
                        id: Some(line_id.clone()),
                        product: "p-1".to_string(),
                        quantity: 5,
                        price: 5.0,
                        is_deleted: false,
                    },
                    LineItem {
                        id: None,
                        product: "p-9".to_string(),
                        quantity: 1,
                        price: 1.0,
                        is_deleted: false,
                    },
                ]),
                ..Default::default()
            },
            "u-1",
        )
        .unwrap();

    assert_eq!(updated.doc.items.len(), 2);
    assert_eq!(updated.doc.items[0].quantity, 5);
    assert_eq!(updated.doc.total_price, 26.0);
    // Appended lines get keyed so later patches can address them.
    assert!(updated.doc.items[1].id.is_some());

    // Dropping a line by marker removes it from the total.
    let updated = app
        .state
        .carts
        .update(
            &cart.id,
            &UpdateCart {
                items: Some(vec![LineItem {
                    id: Some(line_id),
                    product: "p-1".to_string(),
                    quantity: 5,
                    price: 5.0,
                    is_deleted: true,
                }]),
                ..Default::default()
            },
            "u-1",
        )
        .unwrap();
    assert_eq!(updated.doc.items.len(), 1);
    assert_eq!(updated.doc.total_price, 1.0);
}

#[test]
fn checkout_freezes_the_cart() {
    let app = test_app();
    let cart = app.state.carts.upsert_item("u-1", "p-1", 1, 5.0).unwrap();

    let checked = app.state.carts.checkout(&cart.id, "u-1").unwrap();
    assert_eq!(checked.doc.status, CartStatus::CheckedOut);

    // Checked-out carts refuse further updates.
    let err = app
        .state
        .carts
        .update(&cart.id, &UpdateCart::default(), "u-1")
        .unwrap_err();
    assert!(err.is_validation_error());

    // The user's next active cart is a fresh one.
    let fresh = app.state.carts.get_or_create("u-1").unwrap();
    assert_ne!(fresh.id, cart.id);
}

#[test]
fn soft_deleted_cart_reads_as_missing() {
    let app = test_app();
    let cart = app.state.carts.get_or_create("u-1").unwrap();
    app.state.carts.delete(&cart.id, "u-1").unwrap();
    let err = app.state.carts.find_one(&cart.id).unwrap_err();
    assert!(err.is_not_found());
}
