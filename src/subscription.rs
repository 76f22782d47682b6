use crate::error::{panic_message, UnsubscriptionError};
use smallvec::SmallVec;
use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  panic::{self, AssertUnwindSafe},
  rc::Rc,
};
use tracing::{trace, warn};

/// Subscription returns from `Observable::subscribe` to allow unsubscribing.
pub trait SubscriptionLike {
  /// This allows deregistering a stream before it has finished receiving all
  /// events (i.e. before `complete` is called).
  fn unsubscribe(&self);

  fn is_closed(&self) -> bool;
}

/// What a producer hands back from its subscribe function: nothing, a
/// closure to run on teardown, or another subscription to unsubscribe.
///
/// Whatever shape it takes, it becomes a single child of the subscriber's
/// subscription once registered with [`Subscription::add`].
#[derive(Default)]
pub enum TeardownLogic {
  #[default]
  None,
  Closure(Box<dyn FnOnce()>),
  Subscription(Subscription),
}

impl TeardownLogic {
  #[inline]
  pub fn from_fn(f: impl FnOnce() + 'static) -> Self { TeardownLogic::Closure(Box::new(f)) }

  fn execute(self) {
    match self {
      TeardownLogic::None => {}
      TeardownLogic::Closure(f) => f(),
      TeardownLogic::Subscription(s) => s.unsubscribe(),
    }
  }

  #[inline]
  fn is_closed(&self) -> bool {
    match self {
      TeardownLogic::Subscription(s) => s.is_closed(),
      _ => false,
    }
  }
}

impl Debug for TeardownLogic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      TeardownLogic::None => f.write_str("TeardownLogic::None"),
      TeardownLogic::Closure(_) => f.write_str("TeardownLogic::Closure(..)"),
      TeardownLogic::Subscription(s) => f.debug_tuple("TeardownLogic::Subscription").field(s).finish(),
    }
  }
}

impl From<()> for TeardownLogic {
  #[inline]
  fn from(_: ()) -> Self { TeardownLogic::None }
}

impl From<Subscription> for TeardownLogic {
  #[inline]
  fn from(s: Subscription) -> Self { TeardownLogic::Subscription(s) }
}

impl From<Box<dyn FnOnce()>> for TeardownLogic {
  #[inline]
  fn from(f: Box<dyn FnOnce()>) -> Self { TeardownLogic::Closure(f) }
}

/// A node in the teardown tree.
///
/// Cloning yields another handle to the same node: closing one closes all of
/// them.
#[derive(Clone, Default)]
pub struct Subscription(Rc<RefCell<Inner>>);

#[derive(Default)]
struct Inner {
  closed: bool,
  teardowns: SmallVec<[TeardownLogic; 1]>,
}

impl Subscription {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// A subscription that is already closed. Anything added to it is torn down
  /// on the spot.
  pub fn closed() -> Self {
    Subscription(Rc::new(RefCell::new(Inner { closed: true, teardowns: SmallVec::new() })))
  }

  /// Registers `teardown` to run when this subscription is unsubscribed.
  ///
  /// If the subscription is already closed the teardown runs immediately.
  /// Adding a subscription to itself is a no-op.
  pub fn add(&self, teardown: impl Into<TeardownLogic>) {
    let teardown = teardown.into();
    match &teardown {
      TeardownLogic::None => return,
      TeardownLogic::Subscription(s) if s.is_same(self) => return,
      _ => {}
    }

    let mut inner = self.0.borrow_mut();
    if inner.closed {
      drop(inner);
      teardown.execute();
    } else {
      inner.teardowns.retain(|t| !t.is_closed());
      inner.teardowns.push(teardown);
    }
  }

  /// Detaches `child` without unsubscribing it.
  pub fn remove(&self, child: &Subscription) {
    self
      .0
      .borrow_mut()
      .teardowns
      .retain(|t| !matches!(t, TeardownLogic::Subscription(s) if s.is_same(child)));
  }

  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self> { SubscriptionGuard(self) }

  #[inline]
  pub(crate) fn is_same(&self, other: &Subscription) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl SubscriptionLike for Subscription {
  fn unsubscribe(&self) {
    let teardowns = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardowns)
    };
    trace!(teardowns = teardowns.len(), "subscription closed");

    // Last in, first out. A panicking teardown must not starve the rest.
    let mut failures = Vec::new();
    for teardown in teardowns.into_iter().rev() {
      if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(move || teardown.execute())) {
        let message = panic_message(&*payload);
        warn!(%message, "teardown panicked during unsubscribe");
        failures.push(message);
      }
    }

    if !failures.is_empty() && !std::thread::panicking() {
      panic::panic_any(UnsubscriptionError::new(failures));
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.borrow().closed }
}

pub trait TearDownSize: SubscriptionLike {
  fn teardown_size(&self) -> usize;
}

impl TearDownSize for Subscription {
  #[inline]
  fn teardown_size(&self) -> usize { self.0.borrow().teardowns.len() }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.borrow();
    f.debug_struct("Subscription")
      .field("closed", &inner.closed)
      .field("teardown_count", &inner.teardowns.len())
      .finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }
}

impl<T: SubscriptionLike> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::Cell;

  fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> TeardownLogic) {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    (log, move |name: &'static str| {
      let log = c_log.clone();
      TeardownLogic::from_fn(move || log.borrow_mut().push(name))
    })
  }

  #[test]
  fn teardowns_run_last_in_first_out() {
    let (log, teardown) = recorder();
    let subscription = Subscription::new();
    subscription.add(teardown("a"));
    subscription.add(teardown("b"));
    subscription.add(teardown("c"));
    assert_eq!(subscription.teardown_size(), 3);

    subscription.unsubscribe();
    assert_eq!(*log.borrow(), vec!["c", "b", "a"]);
    assert_eq!(subscription.teardown_size(), 0);
  }

  #[test]
  fn unsubscribe_is_idempotent() {
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    let subscription = Subscription::new();
    subscription.add(TeardownLogic::from_fn(move || c_hits.set(c_hits.get() + 1)));

    subscription.unsubscribe();
    subscription.unsubscribe();
    subscription.clone().unsubscribe();
    assert!(subscription.is_closed());
    assert_eq!(hits.get(), 1);
  }

  #[test]
  fn add_after_close_runs_immediately() {
    let (log, teardown) = recorder();
    let subscription = Subscription::closed();
    assert!(subscription.is_closed());
    subscription.add(teardown("late"));
    assert_eq!(*log.borrow(), vec!["late"]);
    assert_eq!(subscription.teardown_size(), 0);
  }

  #[test]
  fn nested_subscriptions_close_recursively() {
    let (log, teardown) = recorder();
    let parent = Subscription::new();
    let child = Subscription::new();
    child.add(teardown("child"));
    parent.add(child.clone());
    parent.add(teardown("parent"));

    parent.unsubscribe();
    assert!(child.is_closed());
    assert_eq!(*log.borrow(), vec!["parent", "child"]);
  }

  #[test]
  fn ignore_self_and_none() {
    let subscription = Subscription::new();
    subscription.add(subscription.clone());
    subscription.add(());
    subscription.add(TeardownLogic::None);
    assert_eq!(subscription.teardown_size(), 0);
    subscription.unsubscribe();
    assert!(subscription.is_closed());
  }

  #[test]
  fn closed_children_are_pruned_on_add() {
    let parent = Subscription::new();
    let c1 = Subscription::new();
    let c2 = Subscription::new();
    parent.add(c1.clone());
    parent.add(c2.clone());
    assert_eq!(parent.teardown_size(), 2);

    c1.unsubscribe();
    parent.add(Subscription::new());
    assert_eq!(parent.teardown_size(), 2);
  }

  #[test]
  fn remove_detaches_without_unsubscribing() {
    let parent = Subscription::new();
    let child = Subscription::new();
    parent.add(child.clone());
    parent.remove(&child);
    assert_eq!(parent.teardown_size(), 0);

    parent.unsubscribe();
    assert!(!child.is_closed());
  }

  #[test]
  fn panicking_teardown_does_not_stop_the_others() {
    let (log, teardown) = recorder();
    let subscription = Subscription::new();
    subscription.add(teardown("first"));
    subscription.add(TeardownLogic::from_fn(|| panic!("broken teardown")));
    subscription.add(teardown("last"));

    let caught = panic::catch_unwind(AssertUnwindSafe(|| subscription.unsubscribe()));
    let payload = caught.expect_err("unsubscribe should surface the failure");
    let err = payload
      .downcast_ref::<UnsubscriptionError>()
      .expect("payload should be an UnsubscriptionError");
    assert_eq!(err.messages, vec!["broken teardown".to_owned()]);
    assert_eq!(*log.borrow(), vec!["last", "first"]);
    assert!(subscription.is_closed());
  }

  #[test]
  fn guard_unsubscribes_on_drop() {
    let subscription = Subscription::new();
    {
      let _guard = subscription.clone().unsubscribe_when_dropped();
      assert!(!subscription.is_closed());
    }
    assert!(subscription.is_closed());
  }
}
