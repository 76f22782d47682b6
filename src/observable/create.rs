use crate::{observable::Observable, subscriber::Subscriber, subscription::TeardownLogic};

/// Creates an observable from a producer function.
///
/// Same as [`Observable::new`], in free-function form.
///
/// ```
/// use rxcore::prelude::*;
/// use std::{cell::RefCell, rc::Rc};
///
/// let emitted = Rc::new(RefCell::new(vec![]));
/// let c_emitted = emitted.clone();
/// observable::create(|subscriber: Subscriber<i32, ()>| {
///   subscriber.next(1);
///   subscriber.next(2);
///   subscriber.complete();
///   Ok(())
/// })
/// .subscribe(move |v| c_emitted.borrow_mut().push(v));
///
/// assert_eq!(*emitted.borrow(), vec![1, 2]);
/// ```
pub fn create<Item, Err, F, T>(producer: F) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
  F: Fn(Subscriber<Item, Err>) -> Result<T, Err> + 'static,
  T: Into<TeardownLogic>,
{
  Observable::new(producer)
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  #[test]
  fn create_error() {
    let error = Rc::new(RefCell::new(None));
    let c_error = error.clone();

    observable::create(|subscriber: Subscriber<(), &'static str>| {
      subscriber.error("oops");
      Ok(())
    })
    .subscribe(PartialObserver::new().on_error(move |e| *c_error.borrow_mut() = Some(e)));

    assert_eq!(*error.borrow(), Some("oops"));
  }

  #[test]
  fn create_teardown() {
    let unsubscribed = Rc::new(Cell::new(false));
    let c_unsubscribed = unsubscribed.clone();

    let subscription = observable::create(move |subscriber: Subscriber<i32, ()>| {
      subscriber.next(1);
      let c_unsubscribed = c_unsubscribed.clone();
      Ok(TeardownLogic::from_fn(move || c_unsubscribed.set(true)))
    })
    .subscribe(|_| {});

    assert!(!unsubscribed.get());
    subscription.unsubscribe();
    assert!(unsubscribed.get());
  }
}
