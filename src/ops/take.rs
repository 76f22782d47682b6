use crate::{
  observable::{Observable, EMPTY},
  ops::OperatorSubscriber,
  subscriber::Subscriber,
  subscription::SubscriptionLike,
};

/// Emits only the first `count` values emitted by the source Observable.
///
/// `take` returns an Observable that emits only the first `count` values
/// emitted by the source Observable. If the source emits fewer than `count`
/// values then all of its values are emitted. After that, it completes,
/// regardless if the source completes.
///
/// With `count == 0` the source is never subscribed; the result completes
/// synchronously, exactly like [`EMPTY`].
///
/// # Example
///
/// ```
/// use rxcore::prelude::*;
///
/// observable::from_iter(0..10)
///   .pipe(ops::take(5))
///   .subscribe(|v| println!("{}", v));
///
/// // print logs:
/// // 0
/// // 1
/// // 2
/// // 3
/// // 4
/// ```
pub fn take<Item, Err>(count: usize) -> impl Fn(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  move |source: Observable<Item, Err>| {
    if count == 0 {
      return Observable::from(EMPTY);
    }

    Observable::new(move |destination: Subscriber<Item, Err>| {
      let mut seen = 0;
      let subscriber = OperatorSubscriber::new(destination)
        .on_next(move |this: &Subscriber<Item, Err>, destination: &Subscriber<Item, Err>, v: Item| {
          seen += 1;
          if seen < count {
            destination.next(v);
          } else if seen == count {
            // Detach from the source before forwarding, so a source looping
            // synchronously cannot push a value past `count`.
            this.unsubscribe();
            destination.subscription().remove(&this.subscription());
            destination.next(v);
            destination.complete();
          }
        })
        .into_subscriber();
      source.subscribe(subscriber);
      Ok(())
    })
  }
}
