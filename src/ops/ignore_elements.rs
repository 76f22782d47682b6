use crate::{function::noop, observable::Observable, ops::OperatorSubscriber, subscriber::Subscriber};

/// Ignores all items emitted by the source Observable and only passes calls
/// of `complete` or `error`.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::from_iter(0..20)
///   .pipe(ops::ignore_elements())
///   .subscribe(|_: i32| unreachable!());
/// ```
pub fn ignore_elements<Item, Err>() -> impl Fn(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  |source: Observable<Item, Err>| {
    Observable::new(move |destination: Subscriber<Item, Err>| {
      source.subscribe(
        OperatorSubscriber::new(destination)
          .on_next(|_: &Subscriber<Item, Err>, _: &Subscriber<Item, Err>, v: Item| noop(v))
          .into_subscriber(),
      );
      Ok(())
    })
  }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  #[test]
  fn smoke() {
    let completed = Rc::new(Cell::new(false));
    let c_completed = completed.clone();
    observable::from_iter(0..20).ignore_elements().subscribe(
      PartialObserver::new()
        .on_next(|_| panic!("no value may pass"))
        .on_complete(move || c_completed.set(true)),
    );
    assert!(completed.get());
  }

  #[test]
  fn error_is_forwarded_unchanged() {
    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    Observable::<i32, Rc<Marker>>::new(|subscriber| {
      subscriber.next(1);
      subscriber.error(Rc::new(Marker(7)));
      Ok(())
    })
    .ignore_elements()
    .subscribe(
      PartialObserver::new()
        .on_next(move |v: i32| l1.borrow_mut().push(format!("next({v})")))
        .on_error(move |e: Rc<Marker>| l2.borrow_mut().push(format!("error({:?})", e)))
        .on_complete(move || l3.borrow_mut().push("complete".to_owned())),
    );

    assert_eq!(*log.borrow(), vec!["error(Marker(7))"]);
  }

  #[test]
  fn error_keeps_its_identity() {
    let original = Rc::new(String::from("E"));
    let received = Rc::new(RefCell::new(None));
    let c_received = received.clone();

    observable::throw_err::<i32, _>(original.clone())
      .ignore_elements()
      .subscribe(PartialObserver::new().on_error(move |e| *c_received.borrow_mut() = Some(e)));

    let received = received.borrow();
    assert!(Rc::ptr_eq(received.as_ref().unwrap(), &original));
  }

  #[test]
  fn complete_is_forwarded_once() {
    let completed = Rc::new(Cell::new(0));
    let c_completed = completed.clone();
    observable::of(1)
      .ignore_elements()
      .subscribe(PartialObserver::new().on_complete(move || c_completed.set(c_completed.get() + 1)));
    assert_eq!(completed.get(), 1);
  }

  #[test]
  fn never_stays_silent_until_unsubscribed() {
    let notified = Rc::new(Cell::new(false));
    let c_notified = notified.clone();
    let subscription = observable::never::<i32, ()>()
      .ignore_elements()
      .subscribe(PartialObserver::new().on_complete(move || c_notified.set(true)));
    assert!(!subscription.is_closed());
    subscription.unsubscribe();
    assert!(subscription.is_closed());
    assert!(!notified.get());
  }
}
