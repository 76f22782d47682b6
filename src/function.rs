/// Accepts anything and does nothing with it.
///
/// Used where a handler slot must be filled but no behavior is wanted, e.g.
/// the next handler of `ignore_elements`.
#[inline(always)]
pub fn noop<T>(_: T) {}

#[test]
fn noop_swallows_anything() {
  noop(());
  noop(42);
  noop((String::from("a"), vec![1, 2, 3]));
}
