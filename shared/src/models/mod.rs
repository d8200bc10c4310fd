//! Domain models
//!
//! Entities and request/response DTOs shared between the server and its
//! clients. Money is carried as `f64` at the serialization boundary; all
//! arithmetic happens in `rust_decimal` inside the server's billing core.

pub mod bill;
pub mod booking;
pub mod extra_service;
pub mod order;
pub mod room;

pub use bill::{
    Bill, BillBreakdownView, CheckoutRequest, DiscountType, ManualCharge, MergeBillsRequest,
    PaymentStatus, PreviewBillRequest,
};
pub use booking::{Booking, BookingCharges, BookingCreate, BookingStatus, BookingUpdate};
pub use extra_service::{ExtraService, ExtraServiceCreate, ServiceKind};
pub use order::{FoodOrder, FoodOrderCreate, OrderStatus, OrderStatusUpdate};
pub use room::{Room, RoomCreate, RoomStatus, RoomUpdate};
