//! Checkout flow integration tests
//!
//! Exercises the checkout service end to end against in-memory SQLite
//! with the real migrations: gates, settlement writes, status flips and
//! the preview path.

mod common;

use common::{seed_booking, seed_order, seed_room, test_state};
use hostezee_server::db::repository::{bill, booking, room};
use hostezee_server::services::checkout;
use shared::error::ErrorCode;
use shared::models::{
    BookingStatus, CheckoutRequest, DiscountType, ManualCharge, OrderStatus, PaymentStatus,
    PreviewBillRequest, RoomStatus,
};

fn paid_request() -> CheckoutRequest {
    CheckoutRequest {
        gst_on_rooms: true,
        gst_on_food: false,
        include_service_charge: false,
        discount_type: DiscountType::None,
        discount_value: None,
        discount_applies_to: None,
        manual_charges: vec![],
        payment_status: PaymentStatus::Paid,
        payment_method: Some("cash".to_string()),
        due_date: None,
        pending_reason: None,
        cash_amount: None,
        online_amount: None,
        prebill_sent: true,
        payment_link_sent: false,
        skip_confirmation: false,
    }
}

#[tokio::test]
async fn checkout_writes_settlement_and_flips_statuses() {
    let state = test_state().await;
    let r = seed_room(&state, "101", 2000.0).await;
    let b = seed_booking(&state, "Asha", vec![r.id], 1, 0.0).await;
    seed_order(&state, b.id, 500.0, OrderStatus::Completed).await;

    let settled = checkout::perform_checkout(&state, b.id, paid_request())
        .await
        .expect("checkout");

    // Room 2000 + food 500, GST 5% on rooms only
    assert_eq!(settled.room_charges, 2000.0);
    assert_eq!(settled.food_charges, 500.0);
    assert_eq!(settled.gst_amount, 100.0);
    assert_eq!(settled.total_amount, 2600.0);
    assert_eq!(settled.payment_status, PaymentStatus::Paid);
    assert_eq!(settled.balance_amount, 0.0);
    // No cash tendered: the whole balance went online
    assert_eq!(settled.online_received, 2600.0);

    let b = booking::find_by_id(&state.pool, b.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(b.status, BookingStatus::CheckedOut);

    let r = room::find_by_id(&state.pool, r.id).await.unwrap().unwrap();
    assert_eq!(r.status, RoomStatus::Cleaning);
}

#[tokio::test]
async fn checkout_applies_discount_after_tax() {
    let state = test_state().await;
    let r = seed_room(&state, "102", 2000.0).await;
    let b = seed_booking(&state, "Ravi", vec![r.id], 1, 0.0).await;
    seed_order(&state, b.id, 500.0, OrderStatus::Completed).await;

    let mut req = paid_request();
    req.discount_type = DiscountType::Percentage;
    req.discount_value = Some("10".to_string());

    let settled = checkout::perform_checkout(&state, b.id, req)
        .await
        .expect("checkout");

    // 10% of the post-tax 2600
    assert_eq!(settled.discount_amount, 260.0);
    assert_eq!(settled.total_amount, 2340.0);
}

#[tokio::test]
async fn checkout_blocked_by_kitchen_orders() {
    let state = test_state().await;
    let r = seed_room(&state, "103", 1500.0).await;
    let b = seed_booking(&state, "Meera", vec![r.id], 1, 0.0).await;
    seed_order(&state, b.id, 300.0, OrderStatus::Preparing).await;

    let err = checkout::perform_checkout(&state, b.id, paid_request())
        .await
        .expect_err("must be blocked");
    assert_eq!(err.code, ErrorCode::CheckoutBlockedByOrders);
    assert!(err.message.contains('1'));

    // No settlement row was written
    let existing = bill::find_settlement_for_booking(&state.pool, b.id)
        .await
        .unwrap();
    assert!(existing.is_none());

    // Booking untouched
    let b = booking::find_by_id(&state.pool, b.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(b.status, BookingStatus::Pending);
}

#[tokio::test]
async fn checkout_requires_prebill_acknowledgement() {
    let state = test_state().await;
    let r = seed_room(&state, "104", 1000.0).await;
    let b = seed_booking(&state, "Karan", vec![r.id], 1, 0.0).await;

    let mut req = paid_request();
    req.prebill_sent = false;
    req.payment_link_sent = false;
    req.skip_confirmation = false;

    let err = checkout::perform_checkout(&state, b.id, req)
        .await
        .expect_err("gate must hold");
    assert_eq!(err.code, ErrorCode::PrebillNotSent);

    // The explicit skip flag is the only way around the gate
    let mut req = paid_request();
    req.prebill_sent = false;
    req.skip_confirmation = true;
    checkout::perform_checkout(&state, b.id, req)
        .await
        .expect("skip flag settles");
}

#[tokio::test]
async fn checkout_pending_needs_no_payment_method() {
    let state = test_state().await;
    let r = seed_room(&state, "105", 1200.0).await;
    let b = seed_booking(&state, "Divya", vec![r.id], 1, 200.0).await;

    let due = shared::util::now_millis() + 7 * 24 * 3600 * 1000;
    let mut req = paid_request();
    req.payment_status = PaymentStatus::Pending;
    req.payment_method = None;
    req.due_date = Some(due);
    req.pending_reason = Some("Company settles monthly".to_string());

    let settled = checkout::perform_checkout(&state, b.id, req)
        .await
        .expect("pending checkout");

    assert_eq!(settled.payment_status, PaymentStatus::Pending);
    assert_eq!(settled.due_date, Some(due));
    // 1200 + 5% GST - 200 advance stays open
    assert_eq!(settled.total_amount, 1260.0);
    assert_eq!(settled.balance_amount, 1060.0);
}

#[tokio::test]
async fn checkout_over_tendered_cash_returns_change() {
    let state = test_state().await;
    let r = seed_room(&state, "106", 1000.0).await;
    let b = seed_booking(&state, "Sunil", vec![r.id], 1, 0.0).await;

    let mut req = paid_request();
    req.gst_on_rooms = false;
    req.cash_amount = Some(1200.0);

    let settled = checkout::perform_checkout(&state, b.id, req)
        .await
        .expect("checkout");

    assert_eq!(settled.total_amount, 1000.0);
    assert_eq!(settled.cash_received, 1200.0);
    assert_eq!(settled.online_received, 0.0);
    assert_eq!(settled.change_due, 200.0);
    assert_eq!(settled.balance_amount, 0.0);
}

#[tokio::test]
async fn checkout_manual_charges_fold_into_subtotal() {
    let state = test_state().await;
    let r = seed_room(&state, "107", 1000.0).await;
    let b = seed_booking(&state, "Nisha", vec![r.id], 1, 0.0).await;

    let mut req = paid_request();
    req.gst_on_rooms = false;
    req.manual_charges = vec![
        ManualCharge {
            name: "Laundry".to_string(),
            amount: "150".to_string(),
        },
        // Invalid rows are dropped silently
        ManualCharge {
            name: "".to_string(),
            amount: "999".to_string(),
        },
        ManualCharge {
            name: "Minibar".to_string(),
            amount: "not a number".to_string(),
        },
    ];

    let settled = checkout::perform_checkout(&state, b.id, req)
        .await
        .expect("checkout");

    assert_eq!(settled.manual_charges_total, 150.0);
    assert_eq!(settled.total_amount, 1150.0);
}

#[tokio::test]
async fn settlement_upsert_is_keyed_by_booking() {
    let state = test_state().await;
    let r = seed_room(&state, "108", 1000.0).await;
    let b = seed_booking(&state, "Vikram", vec![r.id], 1, 0.0).await;

    let first = checkout::perform_checkout(&state, b.id, paid_request())
        .await
        .expect("checkout");

    // A repeated settlement write for the same booking overwrites the
    // row instead of stacking a second one
    let mut write = settlement_write_from(&first);
    write.total_amount = 999.0;

    let mut tx = state.pool.begin().await.unwrap();
    let rewritten_id = bill::upsert_settlement(&mut tx, &write).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(rewritten_id, first.id);
    let bills = bill::find_all(&state.pool, 10, 0).await.unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].total_amount, 999.0);
}

fn settlement_write_from(b: &shared::models::Bill) -> bill::BillWrite {
    bill::BillWrite {
        booking_id: b.booking_id,
        room_charges: b.room_charges,
        food_charges: b.food_charges,
        extra_charges: b.extra_charges,
        manual_charges_total: b.manual_charges_total,
        gst_rate: b.gst_rate,
        gst_amount: b.gst_amount,
        service_charge_rate: b.service_charge_rate,
        service_charge_amount: b.service_charge_amount,
        discount_type: b.discount_type,
        discount_value: b.discount_value,
        discount_amount: b.discount_amount,
        total_amount: b.total_amount,
        advance_paid: b.advance_paid,
        cash_received: b.cash_received,
        online_received: b.online_received,
        change_due: b.change_due,
        balance_amount: b.balance_amount,
        payment_status: b.payment_status,
        payment_method: b.payment_method.clone(),
        due_date: b.due_date,
        pending_reason: b.pending_reason.clone(),
        merged_booking_ids: None,
    }
}

#[tokio::test]
async fn preview_is_read_only_and_matches_checkout() {
    let state = test_state().await;
    let r = seed_room(&state, "109", 2000.0).await;
    let b = seed_booking(&state, "Pooja", vec![r.id], 1, 0.0).await;
    seed_order(&state, b.id, 500.0, OrderStatus::Completed).await;

    let preview_req = PreviewBillRequest {
        gst_on_rooms: true,
        ..Default::default()
    };
    let view = checkout::preview(&state, b.id, &preview_req)
        .await
        .expect("preview");

    assert_eq!(view.total_amount, 2600.0);

    // Nothing was written
    assert!(
        bill::find_settlement_for_booking(&state.pool, b.id)
            .await
            .unwrap()
            .is_none()
    );
    let b2 = booking::find_by_id(&state.pool, b.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(b2.status, BookingStatus::Pending);

    // Settlement agrees with what the guest was shown
    let settled = checkout::perform_checkout(&state, b.id, paid_request())
        .await
        .expect("checkout");
    assert_eq!(settled.total_amount, view.total_amount);
}

#[tokio::test]
async fn checkout_rejects_already_checked_out() {
    let state = test_state().await;
    let r = seed_room(&state, "110", 800.0).await;
    let b = seed_booking(&state, "Rohit", vec![r.id], 1, 0.0).await;

    checkout::perform_checkout(&state, b.id, paid_request())
        .await
        .expect("first checkout");

    // The booking is checked out now; a second attempt is a conflict,
    // corrections go through the upsert only while the stay is open
    let err = checkout::perform_checkout(&state, b.id, paid_request())
        .await
        .expect_err("second checkout must fail");
    assert_eq!(err.code, ErrorCode::BookingAlreadyCheckedOut);
}
