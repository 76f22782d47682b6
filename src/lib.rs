//! # rxcore: the push-based core of Reactive Extensions
//!
//! A single-threaded implementation of the observable contract: lazy
//! producers, subscribers that stop exactly once, subscriptions that own
//! their teardown logic, and the [`OperatorSubscriber`] primitive operators
//! are built from.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxcore::prelude::*;
//!
//! observable::from_iter(0..10)
//!   .take(3)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A lazy producer, run once per `subscribe` |
//! | [`Subscriber`] | Receives `next`, `error` and `complete`, stops once |
//! | [`Subscription`] | Handle that cancels a subscription and runs its teardowns |
//! | [`OperatorSubscriber`] | Wraps a destination to build operators |
//!
//! [`Observable`]: observable::Observable
//! [`Subscriber`]: subscriber::Subscriber
//! [`Subscription`]: subscription::Subscription
//! [`OperatorSubscriber`]: ops::OperatorSubscriber

pub mod error;
pub mod function;
pub mod observable;
pub mod ops;
pub mod prelude;
pub mod subscriber;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;
