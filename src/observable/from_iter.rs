use crate::observable::Observable;
use std::convert::Infallible;

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error.
/// Emission stops early as soon as the subscriber is closed, e.g. by a
/// downstream `take`.
///
/// # Arguments
///
/// * `iter` - An iterator to get all the values from. It is cloned for every
///   subscription.
///
/// # Examples
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> Observable<Iter::Item, Infallible>
where
  Iter: IntoIterator + Clone + 'static,
  Iter::Item: 'static,
{
  Observable::new(move |subscriber| {
    let mut values = iter.clone().into_iter();
    while !subscriber.is_stopped() {
      match values.next() {
        Some(v) => subscriber.next(v),
        None => break,
      }
    }
    subscriber.complete();
    Ok(())
  })
}

/// Creates an observable producing a single value, then completing.
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::of(123).subscribe(|v| println!("{}", v));
/// ```
pub fn of<Item>(v: Item) -> Observable<Item, Infallible>
where
  Item: Clone + 'static,
{
  Observable::new(move |subscriber| {
    subscriber.next(v.clone());
    subscriber.complete();
    Ok(())
  })
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  #[test]
  fn from_range() {
    let hit_count = Rc::new(Cell::new(0));
    let completed = Rc::new(Cell::new(false));
    let (c_hit, c_completed) = (hit_count.clone(), completed.clone());
    observable::from_iter(0..100).subscribe(
      PartialObserver::new()
        .on_next(move |_| c_hit.set(c_hit.get() + 1))
        .on_complete(move || c_completed.set(true)),
    );

    assert_eq!(hit_count.get(), 100);
    assert!(completed.get());
  }

  #[test]
  fn from_vec() {
    let got = Rc::new(RefCell::new(vec![]));
    let c_got = got.clone();
    observable::from_iter(vec![3, 2, 1]).subscribe(move |v| c_got.borrow_mut().push(v));
    assert_eq!(*got.borrow(), vec![3, 2, 1]);
  }

  #[test]
  fn stops_pulling_once_closed() {
    let pulled = Rc::new(Cell::new(0));
    let c_pulled = pulled.clone();
    let counting = (0..1_000).map(move |v| {
      c_pulled.set(c_pulled.get() + 1);
      v
    });

    observable::from_iter(counting).take(3).subscribe(|_| {});
    // the fourth item is never pulled out of the iterator
    assert_eq!(pulled.get(), 3);
  }

  #[test]
  fn of_emits_once() {
    let got = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(Cell::new(0));
    let (c_got, c_completed) = (got.clone(), completed.clone());
    observable::of("single").subscribe(
      PartialObserver::new()
        .on_next(move |v| c_got.borrow_mut().push(v))
        .on_complete(move || c_completed.set(c_completed.get() + 1)),
    );

    assert_eq!(*got.borrow(), vec!["single"]);
    assert_eq!(completed.get(), 1);
  }
}
