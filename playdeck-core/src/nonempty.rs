//! A collection that always holds at least one element.
//!
//! Discovery treats "nothing found" as a failure, never as an empty success,
//! so every discovery result is a [`NonEmpty`] and callers can take
//! [`NonEmpty::head`] without a fallible lookup.

use std::slice;
use std::vec;

/// Vector wrapper validated at construction: never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmpty<T>(Vec<T>);

impl<T> NonEmpty<T> {
    /// Returns `None` when `items` is empty.
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(NonEmpty(items))
        }
    }

    pub fn singleton(item: T) -> Self {
        NonEmpty(vec![item])
    }

    pub fn head(&self) -> &T {
        &self.0[0]
    }

    pub fn into_head(self) -> T {
        let mut items = self.0;
        items.swap_remove(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> NonEmpty<U> {
        NonEmpty(self.0.into_iter().map(f).collect())
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vec_is_rejected() {
        assert!(NonEmpty::<u8>::from_vec(vec![]).is_none());
    }

    #[test]
    fn head_and_len() {
        let items = NonEmpty::from_vec(vec!["a", "b", "c"]).unwrap();
        assert_eq!(*items.head(), "a");
        assert_eq!(items.len(), 3);
        assert_eq!(items.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn map_preserves_order() {
        let items = NonEmpty::from_vec(vec![1, 2, 3]).unwrap().map(|n| n * 10);
        assert_eq!(items.into_vec(), vec![10, 20, 30]);
    }

    #[test]
    fn into_head_takes_first() {
        let items = NonEmpty::from_vec(vec![String::from("x"), String::from("y")]).unwrap();
        assert_eq!(items.into_head(), "x");
        assert_eq!(NonEmpty::singleton(7).into_head(), 7);
    }
}
