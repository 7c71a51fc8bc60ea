use serde::{
    Deserialize, Serialize,
    ser::{SerializeSeq, Serializer},
};

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::iter;
use std::mem;
use std::vec::{self, Vec};

/// Like the `vec!` macro, but enforces at least one argument. A nice short-hand
/// for constructing [`NonEmptyVec`] values.
///
/// ```
/// use fieldval_utils::collections::{NonEmptyVec, non_empty_vec};
///
/// let v = non_empty_vec![1, 2, 3];
/// assert_eq!(v, NonEmptyVec { head: 1, tail: vec![2, 3]});
///
/// let v = non_empty_vec![1];
/// assert_eq!(v, NonEmptyVec::new(1));
///
/// // Accepts trailing commas
/// let v = non_empty_vec![1,];
/// assert_eq!(v, NonEmptyVec::new(1));
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __non_empty_vec {
    ($h:expr, $( $x:expr ),* $(,)?) => {{
        let tail = $crate::collections::__macro_support::vec![$($x),*];
        $crate::collections::NonEmptyVec { head: $h, tail }
    }};
    ($h:expr) => {
        $crate::collections::NonEmptyVec {
            head: $h,
            tail: $crate::collections::__macro_support::vec![],
        }
    };
}

/// A Non-empty growable vector.
///
/// Header field values that are defined as `1#element` lists are
/// backed by this type: once decoded (or constructed), there is always
/// at least one element, so [`NonEmptyVec::first`] and
/// [`NonEmptyVec::last`] don't return an `Option`.
///
/// # Caveats
///
/// Since `NonEmptyVec` must have a least one element, it is not possible to
/// implement the [`FromIterator`] trait for it. Use [`NonEmptyVec::collect`]
/// instead, which returns `None` for an empty iterator.
#[derive(Deserialize)]
#[serde(try_from = "Vec<T>")]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyVec<T> {
    pub head: T,
    pub tail: Vec<T>,
}

// Nb. `Serialize` is implemented manually, as serde's `into` container attribute
// requires a `T: Clone` bound which we'd like to avoid.
impl<T> Serialize for NonEmptyVec<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for e in self {
            seq.serialize_element(e)?;
        }
        seq.end()
    }
}

/// Borrowing iterator over the elements of a [`NonEmptyVec`].
#[derive(Debug, Clone)]
pub struct NonEmptyVecIter<'a, T> {
    head: Option<&'a T>,
    tail: &'a [T],
}

impl<'a, T> Iterator for NonEmptyVecIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.head.take() {
            Some(value)
        } else if let Some((first, rest)) = self.tail.split_first() {
            self.tail = rest;
            Some(first)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for NonEmptyVecIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if let Some((last, rest)) = self.tail.split_last() {
            self.tail = rest;
            Some(last)
        } else {
            self.head.take()
        }
    }
}

impl<T> ExactSizeIterator for NonEmptyVecIter<'_, T> {
    fn len(&self) -> usize {
        self.tail.len() + self.head.map_or(0, |_| 1)
    }
}

impl<T> iter::FusedIterator for NonEmptyVecIter<'_, T> {}

impl<T> NonEmptyVec<T> {
    /// Alias for [`NonEmptyVec::singleton`].
    pub const fn new(e: T) -> Self {
        Self::singleton(e)
    }

    /// Create a new non-empty list with an initial element.
    pub const fn singleton(head: T) -> Self {
        Self {
            head,
            tail: Vec::new(),
        }
    }

    /// Create a non-empty vec from an iterator,
    /// returning `None` in case the iterator yields no elements.
    pub fn collect<I>(iter: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let head = iter.next()?;
        Some(Self {
            head,
            tail: iter.collect(),
        })
    }

    /// Create a non-empty vec from a [`Vec`], returning `None` if it is empty.
    pub fn from_vec(mut vec: Vec<T>) -> Option<Self> {
        if vec.is_empty() {
            None
        } else {
            let head = vec.remove(0);
            Some(Self { head, tail: vec })
        }
    }

    /// Always returns false.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Get the first element. Never fails.
    pub const fn first(&self) -> &T {
        &self.head
    }

    /// Get the possibly-empty tail of the list.
    pub fn tail(&self) -> &[T] {
        &self.tail
    }

    /// Push an element to the end of the list.
    pub fn push(&mut self, e: T) {
        self.tail.push(e)
    }

    /// Get the length of the list.
    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Get the last element. Never fails.
    pub fn last(&self) -> &T {
        match self.tail.last() {
            None => &self.head,
            Some(e) => e,
        }
    }

    /// Check whether an element is contained in the list.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == x)
    }

    /// Get an element by index.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index == 0 {
            Some(&self.head)
        } else {
            self.tail.get(index - 1)
        }
    }

    /// Get an iterator over the elements of the list.
    pub fn iter(&self) -> NonEmptyVecIter<'_, T> {
        NonEmptyVecIter {
            head: Some(&self.head),
            tail: &self.tail,
        }
    }

    /// Returns `true` if `f` holds for any element.
    pub fn any<F>(&self, f: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(f)
    }

    /// Apply a function to all elements, producing a new list
    /// of the same length.
    pub fn map<U, F>(self, mut f: F) -> NonEmptyVec<U>
    where
        F: FnMut(T) -> U,
    {
        NonEmptyVec {
            head: f(self.head),
            tail: self.tail.into_iter().map(f).collect(),
        }
    }

    /// Like [`NonEmptyVec::map`] but short-circuiting on the first error.
    pub fn try_map<E, U, F>(self, mut f: F) -> Result<NonEmptyVec<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(NonEmptyVec {
            head: f(self.head)?,
            tail: self.tail.into_iter().map(f).collect::<Result<_, _>>()?,
        })
    }

    /// Stable sort by key, keeping equal elements in their original order.
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.tail.sort_by_key(&mut f);

        let head_key = f(&self.head);
        let index = self.tail.partition_point(|x| f(x) < head_key);
        if index != 0 {
            let new_head = self.tail.remove(0);
            let head = mem::replace(&mut self.head, new_head);
            self.tail.insert(index - 1, head);
        }
    }

    /// Stable sort by comparator, keeping equal elements in their original order.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.tail.sort_by(&mut compare);

        let index = self
            .tail
            .partition_point(|x| compare(x, &self.head) == Ordering::Less);
        if index != 0 {
            let new_head = self.tail.remove(0);
            let head = mem::replace(&mut self.head, new_head);
            self.tail.insert(index - 1, head);
        }
    }
}

impl<T> From<NonEmptyVec<T>> for Vec<T> {
    fn from(non_empty_vec: NonEmptyVec<T>) -> Self {
        iter::once(non_empty_vec.head)
            .chain(non_empty_vec.tail)
            .collect()
    }
}

impl<T> From<(T, Vec<T>)> for NonEmptyVec<T> {
    fn from((head, tail): (T, Vec<T>)) -> Self {
        Self { head, tail }
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = iter::Chain<iter::Once<T>, vec::IntoIter<Self::Item>>;

    fn into_iter(self) -> Self::IntoIter {
        iter::once(self.head).chain(self.tail)
    }
}

impl<'a, T> IntoIterator for &'a NonEmptyVec<T> {
    type Item = &'a T;
    type IntoIter = NonEmptyVecIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> std::ops::Index<usize> for NonEmptyVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        if index > 0 {
            &self.tail[index - 1]
        } else {
            &self.head
        }
    }
}

impl<A> Extend<A> for NonEmptyVec<A> {
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        self.tail.extend(iter)
    }
}

impl<T> TryFrom<Vec<T>> for NonEmptyVec<T> {
    type Error = NonEmptyVecEmptyError;

    fn try_from(vec: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_vec(vec).ok_or(NonEmptyVecEmptyError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// empty value cannot be turned into a NonEmptyVec
pub struct NonEmptyVecEmptyError;

impl fmt::Display for NonEmptyVecEmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("empty value cannot be turned into a NonEmptyVec")
    }
}

impl std::error::Error for NonEmptyVecEmptyError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::non_empty_vec;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_from_conversion() {
        let result = NonEmptyVec::from((1, vec![2, 3, 4, 5]));
        let expected = NonEmptyVec {
            head: 1,
            tail: vec![2, 3, 4, 5],
        };
        assert_eq!(result, expected);
    }

    #[test]
    fn test_into_iter() {
        let non_empty_vec = NonEmptyVec::from((0, vec![1, 2, 3]));
        for (i, n) in non_empty_vec.into_iter().enumerate() {
            assert_eq!(i as i32, n);
        }
    }

    #[test]
    fn test_iter_both_directions_at_once() {
        let non_empty_vec = NonEmptyVec::from((0, vec![1, 2, 3]));
        let mut i = non_empty_vec.iter();
        assert_eq!(i.len(), 4);
        assert_eq!(i.next(), Some(&0));
        assert_eq!(i.next_back(), Some(&3));
        assert_eq!(i.next(), Some(&1));
        assert_eq!(i.next_back(), Some(&2));
        assert_eq!(i.next(), None);
        assert_eq!(i.next_back(), None);
    }

    #[test]
    fn test_collect() {
        use std::iter::{empty, once};

        assert_eq!(NonEmptyVec::<()>::collect(empty()), None);
        assert_eq!(
            NonEmptyVec::<()>::collect(once(())),
            Some(NonEmptyVec::new(()))
        );
        assert_eq!(
            NonEmptyVec::<u8>::collect(once(1).chain(once(2))),
            Some(non_empty_vec!(1, 2))
        );
    }

    #[test]
    fn test_try_from_empty_vec() {
        assert_eq!(
            NonEmptyVec::<u8>::try_from(Vec::new()),
            Err(NonEmptyVecEmptyError)
        );
        assert_eq!(
            NonEmptyVec::try_from(vec![7u8]),
            Ok(NonEmptyVec::singleton(7))
        );
    }

    #[test]
    fn test_try_map() {
        assert_eq!(
            non_empty_vec!(1, 2, 3, 4).try_map(Ok::<_, String>),
            Ok(non_empty_vec!(1, 2, 3, 4))
        );
        assert_eq!(
            non_empty_vec!(1, 2, 3, 4).try_map(|i| if i % 2 == 0 {
                Ok(i)
            } else {
                Err("not even")
            }),
            Err("not even")
        );
    }

    #[test]
    fn test_sort_by_key_is_stable() {
        let mut pairs = non_empty_vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        pairs.sort_by_key(|(k, _)| *k);
        assert_eq!(pairs, non_empty_vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);

        let mut pairs = non_empty_vec![(1, 'a'), (1, 'b')];
        pairs.sort_by_key(|(k, _)| *k);
        assert_eq!(pairs, non_empty_vec![(1, 'a'), (1, 'b')]);
    }

    #[test]
    fn test_sort_by_reverse() {
        let mut numbers = non_empty_vec![1, 3, 2];
        numbers.sort_by(|a, b| b.cmp(a));
        assert_eq!(numbers, non_empty_vec![3, 2, 1]);
    }

    #[quickcheck]
    fn sort_by_key_matches_vec_sort(head: i8, tail: Vec<i8>) -> bool {
        let mut expected: Vec<i8> = iter::once(head).chain(tail.iter().copied()).collect();
        expected.sort();

        let mut v = NonEmptyVec { head, tail };
        v.sort_by_key(|x| *x);
        Vec::from(v) == expected
    }

    #[test]
    fn test_serde_round_trip() {
        let v = non_empty_vec![1, 2, 3];
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: NonEmptyVec<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_serde_empty_is_rejected() {
        let result: Result<NonEmptyVec<i32>, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
