use thiserror::Error;

/// Raised (as a panic payload) by `Subscription::unsubscribe` when one or more
/// teardowns panicked.
///
/// Every teardown still runs; the failures are collected and reported once
/// the whole list has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} teardown(s) failed during unsubscribe: {}", .messages.len(), .messages.join("; "))]
pub struct UnsubscriptionError {
  pub messages: Vec<String>,
}

impl UnsubscriptionError {
  pub fn new(messages: Vec<String>) -> Self { Self { messages } }

  /// Number of teardowns that failed.
  #[inline]
  pub fn len(&self) -> usize { self.messages.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.messages.is_empty() }
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    (*s).to_owned()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else if let Some(e) = payload.downcast_ref::<UnsubscriptionError>() {
    e.to_string()
  } else {
    "<non-string panic payload>".to_owned()
  }
}
