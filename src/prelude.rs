//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Core types
pub use crate::observable::{Empty, Observable, EMPTY};
// Creation functions live in the `observable` module, operators in `ops`
pub use crate::{observable, ops};
// Observers
pub use crate::subscriber::{IntoSubscriber, PartialObserver, Subscriber};
// Operator building block
pub use crate::ops::OperatorSubscriber;
// Subscription
pub use crate::subscription::*;
pub use crate::{error::UnsubscriptionError, function::noop};
