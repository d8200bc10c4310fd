//! Shared test fixtures: in-memory server state and seed helpers

use hostezee_server::db::repository::{booking, food_order, room};
use hostezee_server::{Config, DbService, ServerState};
use shared::models::{
    Booking, BookingCreate, FoodOrder, FoodOrderCreate, OrderStatus, Room, RoomCreate,
};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Server state over a fresh in-memory database
pub async fn test_state() -> ServerState {
    let db = DbService::in_memory().await.expect("in-memory db");
    let config = Config::with_overrides("/tmp/hostezee-test", 0);
    ServerState::with_db(config, db)
}

pub async fn seed_room(state: &ServerState, number: &str, nightly_rate: f64) -> Room {
    room::create(
        &state.pool,
        RoomCreate {
            number: number.to_string(),
            name: None,
            room_type: "private".to_string(),
            nightly_rate,
        },
    )
    .await
    .expect("seed room")
}

/// One-night booking starting "today" for the given rooms
pub async fn seed_booking(
    state: &ServerState,
    guest: &str,
    room_ids: Vec<i64>,
    nights: i64,
    advance_paid: f64,
) -> Booking {
    let check_in = shared::util::now_millis();
    booking::create(
        &state.pool,
        BookingCreate {
            guest_name: guest.to_string(),
            guest_phone: Some("9900000001".to_string()),
            room_ids,
            check_in,
            check_out: check_in + nights * DAY_MS,
            nightly_rate_override: None,
            advance_paid,
            note: None,
        },
    )
    .await
    .expect("seed booking")
}

/// Food order in the given terminal status
pub async fn seed_order(
    state: &ServerState,
    booking_id: i64,
    amount: f64,
    status: OrderStatus,
) -> FoodOrder {
    let order = food_order::create(
        &state.pool,
        FoodOrderCreate {
            booking_id: Some(booking_id),
            items: r#"[{"name":"Masala Chai","qty":2}]"#.to_string(),
            total_amount: amount,
        },
    )
    .await
    .expect("seed order");

    if status == OrderStatus::Pending {
        return order;
    }
    food_order::set_status(&state.pool, order.id, status)
        .await
        .expect("order status")
}
