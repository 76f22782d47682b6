use crate::{
  ops,
  subscriber::{IntoSubscriber, Subscriber},
  subscription::{Subscription, TeardownLogic},
};
use std::{
  convert::Infallible,
  fmt::{Debug, Formatter},
  rc::Rc,
};
use tracing::{debug, trace};

mod create;
pub use create::*;
mod from_iter;
pub use from_iter::*;
mod trivial;
pub use trivial::*;

type Producer<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> Result<TeardownLogic, Err>;

/// A representation of any set of values over any amount of time. This is the
/// most basic building block of rxcore.
///
/// An observable is lazy: nothing happens until [`Observable::subscribe`] is
/// called, and every call runs the producer again with a fresh subscriber.
pub struct Observable<Item, Err = Infallible> {
  producer: Rc<Producer<Item, Err>>,
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// param `producer`: the function that is called when the Observable is
  /// subscribed to. It is given a Subscriber, to which new values can be
  /// `next`ed, or an `error` method can be called to raise an error, or
  /// `complete` can be called to notify of a successful completion.
  ///
  /// The producer returns the teardown logic releasing whatever it holds.
  /// Returning `Err` reports a setup failure; it is delivered to the
  /// subscriber's error handler instead of escaping `subscribe`.
  pub fn new<F, T>(producer: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> Result<T, Err> + 'static,
    T: Into<TeardownLogic>,
  {
    Observable {
      producer: Rc::new(move |subscriber: Subscriber<Item, Err>| {
        producer(subscriber).map(Into::<TeardownLogic>::into)
      }),
    }
  }

  /// Starts the producer for a new subscriber built from `observer` and
  /// returns the handle that cancels it.
  ///
  /// ```
  /// use rxcore::prelude::*;
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// let got = Rc::new(RefCell::new(vec![]));
  /// let c_got = got.clone();
  /// observable::from_iter(1..=3).subscribe(move |v| c_got.borrow_mut().push(v));
  /// assert_eq!(*got.borrow(), vec![1, 2, 3]);
  /// ```
  pub fn subscribe(&self, observer: impl IntoSubscriber<Item, Err>) -> Subscription {
    let subscriber = observer.into_subscriber();
    trace!(subscriber = ?subscriber, "subscribe");
    match (self.producer)(subscriber.clone()) {
      Ok(teardown) => subscriber.add(teardown),
      Err(err) => {
        debug!("producer failed during setup, routing to the error channel");
        subscriber.error(err);
      }
    }
    subscriber.subscription()
  }

  /// Applies an operator: any function from this observable to another one.
  #[inline]
  pub fn pipe<R, E>(self, op: impl FnOnce(Self) -> Observable<R, E>) -> Observable<R, E> {
    op(self)
  }

  /// Emits only the first `count` values emitted by the source Observable.
  ///
  /// `take` returns an Observable that emits only the first `count` values
  /// emitted by the source Observable. If the source emits fewer than `count`
  /// values then all of its values are emitted. After that, it completes,
  /// regardless if the source completes.
  ///
  /// ```
  /// use rxcore::prelude::*;
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// let got = Rc::new(RefCell::new(vec![]));
  /// let c_got = got.clone();
  /// observable::from_iter(0..10).take(5).subscribe(move |v| c_got.borrow_mut().push(v));
  /// assert_eq!(*got.borrow(), vec![0, 1, 2, 3, 4]);
  /// ```
  #[inline]
  pub fn take(self, count: usize) -> Self { self.pipe(ops::take(count)) }

  /// Ignores all items emitted by the source Observable and only passes calls
  /// of `complete` or `error`.
  #[inline]
  pub fn ignore_elements(self) -> Self { self.pipe(ops::ignore_elements()) }

  /// Calls `callback` once per subscription when it terminates, whether by
  /// completion, error or unsubscribe.
  #[inline]
  pub fn finalize(self, callback: impl Fn() + 'static) -> Self { self.pipe(ops::finalize(callback)) }
}

impl<Item, Err> Clone for Observable<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Observable { producer: self.producer.clone() } }
}

impl<Item, Err> Debug for Observable<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str("Observable { .. }") }
}
