use crate::subscription::{Subscription, SubscriptionLike, TeardownLogic};
use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
  fmt::{Debug, Formatter},
  rc::{Rc, Weak},
};
use tracing::{debug, error, trace};

pub(crate) type NextFn<Item, Err> = Box<dyn FnMut(&Subscriber<Item, Err>, Item)>;
pub(crate) type ErrorFn<Err> = Box<dyn FnOnce(Err)>;
pub(crate) type CompleteFn = Box<dyn FnOnce()>;

/// Any subset of the three notification handlers.
///
/// A missing `next` or `complete` handler ignores the notification, a missing
/// `error` handler reports it through `tracing` and drops it.
///
/// ```
/// use rxcore::prelude::*;
///
/// let observer = PartialObserver::<i32, String>::new()
///   .on_next(|v| println!("value {v}"))
///   .on_complete(|| println!("done"));
/// Observable::from(EMPTY).subscribe(observer);
/// ```
pub struct PartialObserver<Item, Err> {
  pub(crate) next: Option<Box<dyn FnMut(Item)>>,
  pub(crate) error: Option<Box<dyn FnOnce(Err)>>,
  pub(crate) complete: Option<Box<dyn FnOnce()>>,
}

impl<Item, Err> Default for PartialObserver<Item, Err> {
  fn default() -> Self { Self { next: None, error: None, complete: None } }
}

impl<Item, Err> PartialObserver<Item, Err> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  pub fn on_next(mut self, next: impl FnMut(Item) + 'static) -> Self {
    self.next = Some(Box::new(next));
    self
  }

  pub fn on_error(mut self, error: impl FnOnce(Err) + 'static) -> Self {
    self.error = Some(Box::new(error));
    self
  }

  pub fn on_complete(mut self, complete: impl FnOnce() + 'static) -> Self {
    self.complete = Some(Box::new(complete));
    self
  }
}

/// Implements the notification handlers and the Subscription trait. While the
/// handlers are the public API for consuming the values of an Observable, all
/// observers get converted to a Subscriber, in order to provide Subscription
/// capabilities.
///
/// A subscriber stops exactly once: on `error`, on `complete`, or when its
/// subscription is unsubscribed through any handle. After that every
/// notification is a no-op.
pub struct Subscriber<Item, Err>(Rc<SubscriberInner<Item, Err>>);

struct SubscriberInner<Item, Err> {
  subscription: Subscription,
  stopped: Cell<bool>,
  next: RefCell<Option<NextFn<Item, Err>>>,
  // Values pushed while the next handler is running, delivered once it returns.
  pending: RefCell<VecDeque<Item>>,
  error: RefCell<Option<ErrorFn<Err>>>,
  complete: RefCell<Option<CompleteFn>>,
}

impl<Item, Err> SubscriberInner<Item, Err> {
  /// Drops whatever handlers are not currently executing. A running `next`
  /// handler is released by `Subscriber::next` once it returns.
  fn release_handlers(&self) {
    self.stopped.set(true);
    let next = self.next.try_borrow_mut().ok().and_then(|mut slot| slot.take());
    let error = self.error.try_borrow_mut().ok().and_then(|mut slot| slot.take());
    let complete = self.complete.try_borrow_mut().ok().and_then(|mut slot| slot.take());
    let pending = self.pending.try_borrow_mut().map(|mut queue| std::mem::take(&mut *queue));
    drop((next, error, complete, pending));
  }
}

impl<Item: 'static, Err: 'static> Subscriber<Item, Err> {
  pub fn new(observer: PartialObserver<Item, Err>) -> Self {
    let PartialObserver { next, error, complete } = observer;
    let next = next.map(|mut next| {
      Box::new(move |_: &Subscriber<Item, Err>, v: Item| next(v)) as NextFn<Item, Err>
    });
    Self::from_parts(next, error, complete)
  }

  pub(crate) fn from_parts(
    next: Option<NextFn<Item, Err>>,
    error: Option<ErrorFn<Err>>,
    complete: Option<CompleteFn>,
  ) -> Self {
    let inner = Rc::new(SubscriberInner {
      subscription: Subscription::new(),
      stopped: Cell::new(false),
      next: RefCell::new(next),
      pending: RefCell::new(VecDeque::new()),
      error: RefCell::new(error),
      complete: RefCell::new(complete),
    });

    // Registered first, so it runs after every other teardown.
    let weak: Weak<SubscriberInner<Item, Err>> = Rc::downgrade(&inner);
    inner.subscription.add(TeardownLogic::from_fn(move || {
      if let Some(inner) = weak.upgrade() {
        inner.release_handlers();
      }
    }));

    Subscriber(inner)
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  /// A handle to the subscription that owns this subscriber's teardowns.
  #[inline]
  pub fn subscription(&self) -> Subscription { self.0.subscription.clone() }

  /// Registers teardown logic to run when this subscriber stops.
  #[inline]
  pub fn add(&self, teardown: impl Into<TeardownLogic>) { self.0.subscription.add(teardown) }

  #[inline]
  pub fn is_stopped(&self) -> bool { self.0.stopped.get() || self.0.subscription.is_closed() }

  /// Delivers `value` to the next handler.
  ///
  /// A value pushed from inside the running handler (directly or through a
  /// chain that loops back here) is queued and delivered, in order, after the
  /// handler returns, unless the subscriber stopped in the meantime.
  pub fn next(&self, value: Item) {
    if self.is_stopped() {
      return;
    }
    let Ok(mut slot) = self.0.next.try_borrow_mut() else {
      trace!("re-entrant next queued while the next handler is running");
      self.0.pending.borrow_mut().push_back(value);
      return;
    };

    // Values left behind by a handler that unwound go out first.
    let mut value = {
      let mut pending = self.0.pending.borrow_mut();
      match pending.pop_front() {
        Some(front) => {
          pending.push_back(value);
          front
        }
        None => value,
      }
    };
    loop {
      if let Some(handler) = slot.as_mut() {
        handler(self, value);
      }
      if self.is_stopped() {
        break;
      }
      let queued = self.0.pending.borrow_mut().pop_front();
      match queued {
        Some(v) => value = v,
        None => break,
      }
    }

    // The handler may have stopped us; release it now that it has returned.
    if self.is_stopped() {
      let released = slot.take();
      drop(slot);
      drop(released);
      let dropped = std::mem::take(&mut *self.0.pending.borrow_mut());
      drop(dropped);
    }
  }

  pub fn error(&self, err: Err) {
    if self.is_stopped() {
      debug!("error notification on a stopped subscriber ignored");
      return;
    }
    self.0.stopped.set(true);
    let _unsubscribe = UnsubscribeOnDrop(&self.0.subscription);
    let handler = self.0.error.borrow_mut().take();
    match handler {
      Some(handler) => handler(err),
      None => error!("unhandled error notification dropped"),
    }
  }

  pub fn complete(&self) {
    if self.is_stopped() {
      debug!("complete notification on a stopped subscriber ignored");
      return;
    }
    self.0.stopped.set(true);
    let _unsubscribe = UnsubscribeOnDrop(&self.0.subscription);
    let handler = self.0.complete.borrow_mut().take();
    if let Some(handler) = handler {
      handler();
    }
  }
}

/// Unsubscribes when dropped, so a terminal handler that panics still tears
/// the subscriber down while the panic unwinds to the caller.
struct UnsubscribeOnDrop<'a>(&'a Subscription);

impl Drop for UnsubscribeOnDrop<'_> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}

impl<Item, Err> SubscriptionLike for Subscriber<Item, Err> {
  #[inline]
  fn unsubscribe(&self) { self.0.subscription.unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.subscription.is_closed() }
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Subscriber(self.0.clone()) }
}

impl<Item, Err> Debug for Subscriber<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscriber")
      .field("stopped", &self.is_stopped())
      .field("subscription", &self.0.subscription)
      .finish()
  }
}

/// Anything `Observable::subscribe` accepts: a ready-made [`Subscriber`], a
/// [`PartialObserver`], or a bare `FnMut(Item)` used as the next handler.
pub trait IntoSubscriber<Item, Err> {
  fn into_subscriber(self) -> Subscriber<Item, Err>;
}

impl<Item, Err> IntoSubscriber<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn into_subscriber(self) -> Subscriber<Item, Err> { self }
}

impl<Item: 'static, Err: 'static> IntoSubscriber<Item, Err> for PartialObserver<Item, Err> {
  #[inline]
  fn into_subscriber(self) -> Subscriber<Item, Err> { Subscriber::new(self) }
}

impl<Item: 'static, Err: 'static, F> IntoSubscriber<Item, Err> for F
where
  F: FnMut(Item) + 'static,
{
  #[inline]
  fn into_subscriber(self) -> Subscriber<Item, Err> {
    Subscriber::new(PartialObserver::new().on_next(self))
  }
}
