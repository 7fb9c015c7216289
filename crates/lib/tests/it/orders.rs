//! Order creation, status machine, and scoping.

use bazaar::auth::Identity;
use bazaar::carts::LineItem;
use bazaar::data::PageQuery;
use bazaar::orders::{CreateOrder, OrderStatus, PaymentStatus, UpdateOrder};

use crate::helpers::test_app;

fn identity(id: &str, is_admin: bool) -> Identity {
    Identity {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        is_admin,
        is_super_admin: false,
    }
}

fn line(product: &str, quantity: u32, price: f64) -> LineItem {
    LineItem {
        id: None,
        product: product.to_string(),
        quantity,
        price,
        is_deleted: false,
    }
}

fn create_order() -> CreateOrder {
    CreateOrder {
        items: vec![line("p-1", 2, 5.0), line("p-2", 1, 3.0)],
        shipping_address: "1 Main St".to_string(),
        billing_address: "1 Main St".to_string(),
        payment_details: None,
    }
}

#[test]
fn create_computes_total_and_defaults() {
    let app = test_app();
    let stored = app.state.orders.create(create_order(), "cust-1").unwrap();

    assert_eq!(stored.doc.total_price, 13.0);
    assert_eq!(stored.doc.status, OrderStatus::Pending);
    assert_eq!(stored.doc.payment_status, PaymentStatus::Pending);
    assert!(stored.doc.items.iter().all(|item| item.id.is_some()));
}

#[test]
fn empty_order_is_rejected() {
    let app = test_app();
    let mut data = create_order();
    data.items.clear();
    let err = app.state.orders.create(data, "cust-1").unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn status_machine_moves_forward() {
    let app = test_app();
    let stored = app.state.orders.create(create_order(), "cust-1").unwrap();
    let admin = identity("admin-1", true);

    let patch = |status| UpdateOrder {
        status: Some(status),
        ..Default::default()
    };

    // Pending cannot jump straight to Shipped.
    let err = app
        .state
        .orders
        .update(&stored.id, &patch(OrderStatus::Shipped), &admin)
        .unwrap_err();
    assert!(err.is_validation_error());

    app.state
        .orders
        .update(&stored.id, &patch(OrderStatus::Confirmed), &admin)
        .unwrap();
    app.state
        .orders
        .update(&stored.id, &patch(OrderStatus::Shipped), &admin)
        .unwrap();
    let delivered = app
        .state
        .orders
        .update(&stored.id, &patch(OrderStatus::Delivered), &admin)
        .unwrap();
    assert!(delivered.doc.delivered_at.is_some());

    // Delivered is terminal.
    let err = app
        .state
        .orders
        .update(&stored.id, &patch(OrderStatus::Canceled), &admin)
        .unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn cancellation_stamps_timestamp() {
    let app = test_app();
    let stored = app.state.orders.create(create_order(), "cust-1").unwrap();
    app.clock.set(1_800_000_000_000);

    let canceled = app
        .state
        .orders
        .update(
            &stored.id,
            &UpdateOrder {
                status: Some(OrderStatus::Canceled),
                ..Default::default()
            },
            &identity("cust-1", false),
        )
        .unwrap();
    assert_eq!(canceled.doc.canceled_at, Some(1_800_000_000_000));
}

#[test]
fn items_merge_recomputes_total() {
    let app = test_app();
    let stored = app.state.orders.create(create_order(), "cust-1").unwrap();
    let first_line = stored.doc.items[0].id.clone().unwrap();

    let updated = app
        .state
        .orders
        .update(
            &stored.id,
            &UpdateOrder {
                items: Some(vec![LineItem {
                    id: Some(first_line),
                    product: "p-1".to_string(),
                    quantity: 4,
                    price: 5.0,
                    is_deleted: false,
                }]),
                ..Default::default()
            },
            &identity("cust-1", false),
        )
        .unwrap();
    assert_eq!(updated.doc.total_price, 23.0);
}

#[test]
fn orders_are_scoped_to_their_customer() {
    let app = test_app();
    let stored = app.state.orders.create(create_order(), "cust-1").unwrap();
    app.state.orders.create(create_order(), "cust-2").unwrap();

    let err = app
        .state
        .orders
        .find_one(&stored.id, &identity("cust-2", false))
        .unwrap_err();
    assert!(err.is_permission_denied());

    let mine = app
        .state
        .orders
        .find_all(&PageQuery::default(), &identity("cust-1", false))
        .unwrap();
    assert_eq!(mine.data.len(), 1);

    let all = app
        .state
        .orders
        .find_all(&PageQuery::default(), &identity("admin", true))
        .unwrap();
    assert_eq!(all.data.len(), 2);
}
