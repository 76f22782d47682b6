//! Operators: functions from one [`Observable`](crate::observable::Observable)
//! to another, applied with `Observable::pipe` or the matching method.

pub mod operator_subscriber;
pub use operator_subscriber::OperatorSubscriber;

mod finalize;
pub use finalize::finalize;
mod ignore_elements;
pub use ignore_elements::ignore_elements;
mod take;
pub use take::take;
