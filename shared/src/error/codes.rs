//! Unified error codes for the marketplace backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payout/settlement errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4002,
    /// Cart contains no valid products
    EmptyCart = 4003,
    /// Unrecognized order/item status
    InvalidStatus = 4004,
    /// Status transition not allowed for this actor
    InvalidStatusTransition = 4005,
    /// Could not allocate a unique order number
    OrderNumberExhausted = 4006,
    /// Unsupported payment method
    UnsupportedPaymentMethod = 4007,

    // ==================== 5xxx: Payout ====================
    /// Settlement record not found
    PaymentNotFound = 5001,
    /// Settlement already generated for this period
    PeriodAlreadyGenerated = 5002,
    /// Settlement already marked as paid
    PaymentAlreadyPaid = 5003,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is not active
    ProductInactive = 6002,
    /// Shop not found
    ShopNotFound = 6003,
    /// Shop is closed
    ShopClosed = 6004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",

            Self::NotAuthenticated => "Not authenticated",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Invalid token",

            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required",
            Self::AdminRequired => "Admin role required",

            Self::OrderNotFound => "Order not found",
            Self::OrderItemNotFound => "Order item not found",
            Self::EmptyCart => "No valid products in cart",
            Self::InvalidStatus => "Invalid order status",
            Self::InvalidStatusTransition => "Status transition not allowed",
            Self::OrderNumberExhausted => "Failed to allocate a unique order number",
            Self::UnsupportedPaymentMethod => "Unsupported payment method",

            Self::PaymentNotFound => "Settlement record not found",
            Self::PeriodAlreadyGenerated => "Payments already generated for this period",
            Self::PaymentAlreadyPaid => "Settlement already marked as paid",

            Self::ProductNotFound => "Product not found",
            Self::ProductInactive => "Product is not available",
            Self::ShopNotFound => "Shop not found",
            Self::ShopClosed => "Shop is currently closed",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unrecognized u16 into [`ErrorCode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::RequiredField,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,
            2003 => Self::AdminRequired,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderItemNotFound,
            4003 => Self::EmptyCart,
            4004 => Self::InvalidStatus,
            4005 => Self::InvalidStatusTransition,
            4006 => Self::OrderNumberExhausted,
            4007 => Self::UnsupportedPaymentMethod,

            5001 => Self::PaymentNotFound,
            5002 => Self::PeriodAlreadyGenerated,
            5003 => Self::PaymentAlreadyPaid,

            6001 => Self::ProductNotFound,
            6002 => Self::ProductInactive,
            6003 => Self::ShopNotFound,
            6004 => Self::ShopClosed,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
