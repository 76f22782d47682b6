use crate::{observable::Observable, ops::OperatorSubscriber, subscriber::Subscriber};
use std::rc::Rc;

/// Calls `func` once per subscription when it terminates: after the source
/// completes or errors, or when the subscription is unsubscribed.
///
/// Values, errors and completion pass through unchanged.
///
/// ```
/// use rxcore::prelude::*;
/// use std::{cell::Cell, rc::Rc};
///
/// let finalized = Rc::new(Cell::new(false));
/// let c_finalized = finalized.clone();
/// observable::of(1)
///   .pipe(ops::finalize(move || c_finalized.set(true)))
///   .subscribe(|_| {});
/// assert!(finalized.get());
/// ```
pub fn finalize<Item, Err, F>(func: F) -> impl Fn(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
  F: Fn() + 'static,
{
  let func = Rc::new(func);
  move |source: Observable<Item, Err>| {
    let func = func.clone();
    Observable::new(move |destination: Subscriber<Item, Err>| {
      let func = func.clone();
      source.subscribe(
        OperatorSubscriber::new(destination)
          .on_finalize(move || (*func)())
          .into_subscriber(),
      );
      Ok(())
    })
  }
}
