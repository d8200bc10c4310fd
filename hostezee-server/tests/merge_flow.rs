//! Bill merge integration tests

mod common;

use common::{seed_booking, seed_order, seed_room, test_state};
use hostezee_server::db::repository::bill;
use hostezee_server::services::merge;
use shared::error::ErrorCode;
use shared::models::{CheckoutRequest, DiscountType, OrderStatus, PaymentStatus};

#[tokio::test]
async fn merge_combines_bookings_at_fixed_rates() {
    let state = test_state().await;
    let room_a = seed_room(&state, "201", 3000.0).await;
    let room_b = seed_room(&state, "202", 4000.0).await;
    let a = seed_booking(&state, "Asha", vec![room_a.id], 1, 0.0).await;
    let b = seed_booking(&state, "Ravi", vec![room_b.id], 1, 0.0).await;
    seed_order(&state, b.id, 500.0, OrderStatus::Completed).await;

    let merged = merge::merge_bills(&state, &[a.id, b.id], a.id)
        .await
        .expect("merge");

    // 3000 + 4000 rooms + 500 food = 7500; 18% GST, 10% service charge
    assert_eq!(merged.room_charges, 7000.0);
    assert_eq!(merged.food_charges, 500.0);
    assert_eq!(merged.gst_rate, 18.0);
    assert_eq!(merged.gst_amount, 1350.0);
    assert_eq!(merged.service_charge_amount, 750.0);
    assert_eq!(merged.total_amount, 9600.0);

    assert_eq!(merged.booking_id, a.id);
    assert_eq!(merged.merged_booking_ids, Some(vec![a.id, b.id]));
    assert_eq!(merged.payment_status, PaymentStatus::Unpaid);
    assert_eq!(merged.balance_amount, merged.total_amount);
}

#[tokio::test]
async fn merge_excludes_cancelled_orders() {
    let state = test_state().await;
    let room_a = seed_room(&state, "203", 1000.0).await;
    let room_b = seed_room(&state, "204", 1000.0).await;
    let a = seed_booking(&state, "Meera", vec![room_a.id], 1, 0.0).await;
    let b = seed_booking(&state, "Karan", vec![room_b.id], 1, 0.0).await;
    seed_order(&state, a.id, 400.0, OrderStatus::Completed).await;
    seed_order(&state, b.id, 999.0, OrderStatus::Cancelled).await;

    let merged = merge::merge_bills(&state, &[a.id, b.id], b.id)
        .await
        .expect("merge");

    assert_eq!(merged.food_charges, 400.0);
}

#[tokio::test]
async fn merge_requires_two_distinct_bookings() {
    let state = test_state().await;
    let r = seed_room(&state, "205", 1000.0).await;
    let a = seed_booking(&state, "Divya", vec![r.id], 1, 0.0).await;

    let err = merge::merge_bills(&state, &[a.id], a.id)
        .await
        .expect_err("single booking");
    assert_eq!(err.code, ErrorCode::MergeInvalidSet);

    let err = merge::merge_bills(&state, &[a.id, a.id], a.id)
        .await
        .expect_err("duplicate IDs");
    assert_eq!(err.code, ErrorCode::MergeInvalidSet);
}

#[tokio::test]
async fn merge_rejects_primary_outside_set() {
    let state = test_state().await;
    let room_a = seed_room(&state, "206", 1000.0).await;
    let room_b = seed_room(&state, "207", 1000.0).await;
    let a = seed_booking(&state, "Sunil", vec![room_a.id], 1, 0.0).await;
    let b = seed_booking(&state, "Nisha", vec![room_b.id], 1, 0.0).await;
    let c = seed_booking(&state, "Rohit", vec![room_b.id], 1, 0.0).await;

    let err = merge::merge_bills(&state, &[a.id, b.id], c.id)
        .await
        .expect_err("primary not a member");
    assert_eq!(err.code, ErrorCode::MergeInvalidSet);
}

#[tokio::test]
async fn merge_rejects_missing_bookings_without_writing() {
    let state = test_state().await;
    let r = seed_room(&state, "208", 1000.0).await;
    let a = seed_booking(&state, "Pooja", vec![r.id], 1, 0.0).await;

    let err = merge::merge_bills(&state, &[a.id, 424242], a.id)
        .await
        .expect_err("missing booking");
    assert_eq!(err.code, ErrorCode::MergeBookingMissing);
    assert!(err.message.contains("424242"));

    let bills = bill::find_all(&state.pool, 10, 0).await.unwrap();
    assert!(bills.is_empty());
}

#[tokio::test]
async fn merge_leaves_existing_settlements_untouched() {
    let state = test_state().await;
    let room_a = seed_room(&state, "209", 2000.0).await;
    let room_b = seed_room(&state, "210", 1000.0).await;
    let a = seed_booking(&state, "Vikram", vec![room_a.id], 1, 0.0).await;
    let b = seed_booking(&state, "Asha", vec![room_b.id], 1, 0.0).await;

    // Booking A already settled on its own
    let settlement = hostezee_server::services::checkout::perform_checkout(
        &state,
        a.id,
        CheckoutRequest {
            gst_on_rooms: false,
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
            cash_amount: Some(2000.0),
            online_amount: None,
            prebill_sent: true,
            payment_link_sent: false,
            skip_confirmation: false,
        },
    )
    .await
    .expect("settle booking A");

    let merged = merge::merge_bills(&state, &[a.id, b.id], a.id)
        .await
        .expect("merge");

    // The merged bill is an additional record; A's settlement survives
    // unchanged and both rows coexist
    assert_ne!(merged.id, settlement.id);
    let still_there = bill::find_settlement_for_booking(&state.pool, a.id)
        .await
        .unwrap()
        .expect("settlement kept");
    assert_eq!(still_there.id, settlement.id);
    assert_eq!(still_there.total_amount, settlement.total_amount);
    assert!(still_there.merged_booking_ids.is_none());

    let fetched = bill::find_by_id(&state.pool, merged.id).await.unwrap();
    assert!(fetched.unwrap().merged_booking_ids.is_some());
}
