use crate::{
  observable::Observable,
  subscriber::{IntoSubscriber, Subscriber},
  subscription::Subscription,
};

/// The observable that emits no items and completes immediately.
///
/// `Empty` holds no state, so a single constant ([`EMPTY`]) serves every
/// item and error type; it turns into a typed [`Observable`] on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Empty;

/// The shared empty observable.
///
/// # Examples
/// ```
/// use rxcore::prelude::*;
///
/// EMPTY.subscribe::<i32, ()>(|v| println!("{},", v));
///
/// // Result: nothing printed
/// ```
pub const EMPTY: Empty = Empty;

fn complete_at_once<Item, Err>(subscriber: Subscriber<Item, Err>) -> Result<(), Err> {
  subscriber.complete();
  Ok(())
}

impl Empty {
  /// Completes `observer` synchronously without emitting anything.
  pub fn subscribe<Item: 'static, Err: 'static>(
    &self,
    observer: impl IntoSubscriber<Item, Err>,
  ) -> Subscription {
    Observable::from(*self).subscribe(observer)
  }
}

impl<Item: 'static, Err: 'static> From<Empty> for Observable<Item, Err> {
  #[inline]
  fn from(_: Empty) -> Self { Observable::new(complete_at_once::<Item, Err>) }
}

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
#[inline]
pub fn empty<Item: 'static, Err: 'static>() -> Observable<Item, Err> { EMPTY.into() }

/// Creates an observable that emits no items, just terminates with an error.
///
/// # Arguments
///
/// * `e` - An error to emit and terminate with
pub fn throw_err<Item, Err>(e: Err) -> Observable<Item, Err>
where
  Item: 'static,
  Err: Clone + 'static,
{
  Observable::new(move |subscriber: Subscriber<Item, Err>| {
    subscriber.error(e.clone());
    Ok(())
  })
}

/// Creates an observable that never emits anything.
///
/// Neither emits a value, nor completes, nor emits an error.
pub fn never<Item: 'static, Err: 'static>() -> Observable<Item, Err> {
  Observable::new(|_: Subscriber<Item, Err>| Ok(()))
}
