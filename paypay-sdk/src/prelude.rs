//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use paypay_sdk::prelude::*;
//! ```

// Client and configuration
pub use crate::{BizContentMode, PayPayClient, PayPayConfig};

// Error handling
pub use crate::errors::{PayPayError, PayPayErrorCode};
pub use crate::Result;

// Requests
pub use crate::operations::{
    AccountTransferRequest, Amount, BankTransferRequest, CloseRequest, PaymentRequest,
    QueryRequest, RefundRequest,
};

// Responses and notifications
pub use crate::notification::{Notification, TradeStatus};
pub use crate::response::PaymentResponse;

// Extension points
pub use crate::clock::Clock;
pub use crate::transport::Transport;
pub use crate::ParameterSet;
