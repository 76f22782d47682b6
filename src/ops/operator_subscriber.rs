//! The wrapping primitive every operator is built on.
//!
//! An [`OperatorSubscriber`] sits between a source and a destination
//! subscriber. Each notification channel either runs a hook supplied by the
//! operator or, when no hook is set, is forwarded to the destination as is.

use crate::{
  subscriber::{CompleteFn, ErrorFn, NextFn, Subscriber},
  subscription::TeardownLogic,
};

type NextHook<In, Out, Err> = Box<dyn FnMut(&Subscriber<In, Err>, &Subscriber<Out, Err>, In)>;
type ErrorHook<Out, Err> = Box<dyn FnOnce(&Subscriber<Out, Err>, Err)>;
type CompleteHook<Out, Err> = Box<dyn FnOnce(&Subscriber<Out, Err>)>;

/// Builder for the subscriber an operator hands to its source.
///
/// Hooks replace forwarding: a hook that still wants a notification to reach
/// the destination calls the destination itself. The next hook also receives
/// the operator's own subscriber, so it can unsubscribe itself mid-stream.
///
/// The destination is only ever used to forward notifications; its lifecycle
/// belongs to whoever built the chain. The built subscriber is registered as a
/// child of the destination, so tearing the destination down tears the
/// operator and its upstream down too.
///
/// ```
/// use rxcore::prelude::*;
/// use std::{cell::RefCell, rc::Rc};
///
/// // A doubling operator.
/// fn double(source: Observable<i32>) -> Observable<i32> {
///   Observable::new(move |destination| {
///     source.subscribe(
///       OperatorSubscriber::new(destination)
///         .on_next(|_: &Subscriber<i32, _>, destination: &Subscriber<i32, _>, v: i32| {
///           destination.next(v * 2)
///         })
///         .into_subscriber(),
///     );
///     Ok(())
///   })
/// }
///
/// let got = Rc::new(RefCell::new(vec![]));
/// let c_got = got.clone();
/// observable::from_iter(1..=3).pipe(double).subscribe(move |v| c_got.borrow_mut().push(v));
/// assert_eq!(*got.borrow(), vec![2, 4, 6]);
/// ```
pub struct OperatorSubscriber<In, Out, Err> {
  destination: Subscriber<Out, Err>,
  next: NextHook<In, Out, Err>,
  error: Option<ErrorHook<Out, Err>>,
  complete: Option<CompleteHook<Out, Err>>,
  finalize: Option<Box<dyn FnOnce()>>,
}

impl<Item: 'static, Err: 'static> OperatorSubscriber<Item, Item, Err> {
  /// An operator subscriber that forwards every channel to `destination`.
  pub fn new(destination: Subscriber<Item, Err>) -> Self {
    OperatorSubscriber {
      destination,
      next: Box::new(|_: &Subscriber<Item, Err>, destination: &Subscriber<Item, Err>, v: Item| {
        destination.next(v)
      }),
      error: None,
      complete: None,
      finalize: None,
    }
  }
}

impl<In: 'static, Out: 'static, Err: 'static> OperatorSubscriber<In, Out, Err> {
  /// Replaces the next channel. The hook is called with the operator's own
  /// subscriber, the destination and the value.
  pub fn on_next<NewIn, F>(self, hook: F) -> OperatorSubscriber<NewIn, Out, Err>
  where
    F: FnMut(&Subscriber<NewIn, Err>, &Subscriber<Out, Err>, NewIn) + 'static,
  {
    let OperatorSubscriber { destination, error, complete, finalize, .. } = self;
    OperatorSubscriber { destination, next: Box::new(hook), error, complete, finalize }
  }

  pub fn on_error(mut self, hook: impl FnOnce(&Subscriber<Out, Err>, Err) + 'static) -> Self {
    self.error = Some(Box::new(hook));
    self
  }

  pub fn on_complete(mut self, hook: impl FnOnce(&Subscriber<Out, Err>) + 'static) -> Self {
    self.complete = Some(Box::new(hook));
    self
  }

  /// Runs `finalize` exactly once when the operator's subscriber terminates,
  /// whichever way it terminates, after its other teardowns.
  pub fn on_finalize(mut self, finalize: impl FnOnce() + 'static) -> Self {
    self.finalize = Some(Box::new(finalize));
    self
  }

  /// Builds the subscriber and registers it with the destination.
  pub fn into_subscriber(self) -> Subscriber<In, Err> {
    let OperatorSubscriber { destination, mut next, error, complete, finalize } = self;

    let to = destination.clone();
    let next: NextFn<In, Err> = Box::new(move |this: &Subscriber<In, Err>, v: In| next(this, &to, v));

    let to = destination.clone();
    let error: ErrorFn<Err> = match error {
      Some(hook) => Box::new(move |e| hook(&to, e)),
      None => Box::new(move |e| to.error(e)),
    };

    let to = destination.clone();
    let complete: CompleteFn = match complete {
      Some(hook) => Box::new(move || hook(&to)),
      None => Box::new(move || to.complete()),
    };

    let subscriber = Subscriber::from_parts(Some(next), Some(error), Some(complete));
    if let Some(finalize) = finalize {
      subscriber.add(TeardownLogic::Closure(finalize));
    }

    // A destination that already stopped closes the new subscriber at once.
    destination.add(subscriber.subscription());
    subscriber
  }
}
