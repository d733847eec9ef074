//! Domain models
//!
//! Plain serde structs mirroring the relational schema; `sqlx::FromRow` is
//! derived behind the `db` feature so clients without a database dependency
//! can still use the wire types.

pub mod order;
pub mod product;
pub mod shop;
pub mod shop_payment;
pub mod status;
pub mod user;

pub use order::{
    AdminOrderStatusUpdate, CartLine, ItemStatusUpdate, Order, OrderItem, OrderPlaced,
    OrderStatusHistory, OrderWithItems, PlaceOrderRequest, ShippingDetails,
};
pub use product::{Product, SizeVariant};
pub use shop::Shop;
pub use shop_payment::{
    GeneratePaymentsRequest, GeneratePaymentsResult, MarkPaidRequest, ShopPayment,
};
pub use status::{OrderStatus, PaymentMethod, PaymentStatus, PayoutStatus, PeriodType};
pub use user::{LoginRequest, LoginResponse, User};
