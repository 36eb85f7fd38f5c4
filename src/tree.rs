pub trait TreeOps<T> {
    /// Returns `true` when the value was not present before.
    fn insert(&mut self, value: T) -> bool;
    fn contains(&self, value: &T) -> bool;
    /// Returns `true` when an occurrence of the value was removed.
    fn remove(&mut self, value: &T) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
