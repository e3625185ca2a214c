mod into_iter;

pub use into_iter::IntoIter;

use std::{fmt, hash, iter::FusedIterator, ops, slice};

use crate::collections::{
    CopyError, EmptyError, Enumerable, Enumerator, IndexError,
    enumerator::{Hint, Sealed, next_instance},
    error::check_copy_room,
};

/// Capacity the buffer is resized to once `len` elements no longer fit: `ceil(len * 1.2)`.
#[inline]
pub const fn grown_capacity(len: usize) -> usize {
    len.saturating_mul(6).div_ceil(5)
}

/// LIFO stack over an exactly-sized buffer.
///
/// Slots `0..len` hold the elements bottom-to-top, the remaining slots are vacant and
/// every removal empties the slot it vacates. The public view is top-relative:
/// [`get(0)`](Self::get) is the top, and iteration, enumeration and
/// [`copy_to`](Self::copy_to) all run top-to-bottom.
///
/// Growth happens only in [`push`](Self::push) (to [`grown_capacity`]),
/// [`reserve`](Self::reserve) and [`shrink_to_fit`](Self::shrink_to_fit), so
/// [`capacity`](Self::capacity) is always exactly the buffer length.
pub struct ArrayStack<T> {
    buf: Box<[Option<T>]>,
    len: usize,
    version: u64,
    instance: u64,
}

impl<T> ArrayStack<T> {
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vacant_buf(capacity),
            len: 0,
            version: 0,
            instance: next_instance(),
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline]
    pub const fn is_synchronized(&self) -> bool {
        false
    }

    pub fn push(&mut self, value: T) {
        let len = self.len + 1;
        if self.capacity() < len {
            self.resize_buf(grown_capacity(len));
        }
        self.buf[self.len] = Some(value);
        self.len = len;
        self.version = self.version.wrapping_add(1);
    }

    #[inline]
    pub fn peek(&self) -> Result<&T, EmptyError> {
        self.get(0).map_err(|_| EmptyError)
    }

    #[inline]
    pub fn peek_mut(&mut self) -> Result<&mut T, EmptyError> {
        self.get_mut(0).map_err(|_| EmptyError)
    }

    pub fn pop(&mut self) -> Result<T, EmptyError> {
        let top = self.len.checked_sub(1).ok_or(EmptyError)?;
        let value = self.buf[top].take().ok_or(EmptyError)?;
        self.len = top;
        self.version = self.version.wrapping_add(1);
        Ok(value)
    }

    /// Removes the top element without returning it.
    #[inline]
    pub fn remove_top(&mut self) -> Result<(), EmptyError> {
        self.pop().map(drop)
    }

    /// Element `index` positions below the top.
    pub fn get(&self, index: usize) -> Result<&T, IndexError> {
        let err = IndexError {
            index,
            len: self.len,
        };
        let slot = self.slot_of(index).ok_or(err)?;
        self.buf[slot].as_ref().ok_or(err)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
        let err = IndexError {
            index,
            len: self.len,
        };
        let slot = self.slot_of(index).ok_or(err)?;
        self.buf[slot].as_mut().ok_or(err)
    }

    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.buf[..self.len].iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
        self.version = self.version.wrapping_add(1);
    }

    /// Grows the buffer to exactly `amount` slots if it is smaller.
    pub fn reserve(&mut self, amount: usize) {
        if self.capacity() < amount {
            self.resize_buf(amount);
        }
    }

    pub fn shrink_to_fit(&mut self) {
        if self.capacity() != self.len {
            self.resize_buf(self.len);
        }
    }

    /// Copies the elements top-to-bottom into `dst[index..]`.
    pub fn copy_to<U: From<T>>(&self, dst: &mut [U], index: usize) -> Result<(), CopyError>
    where
        T: Clone,
    {
        check_copy_room(dst.len(), index, self.len)?;
        dst[index..]
            .iter_mut()
            .zip(self)
            .for_each(|(dst, value)| *dst = U::from(value.clone()));
        Ok(())
    }

    #[inline]
    pub fn enumerator(&self) -> Enumerator<Self> {
        Enumerator::new(self)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.buf[..self.len].iter(),
        }
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            slots: self.buf[..self.len].iter_mut(),
        }
    }

    #[inline]
    fn slot_of(&self, index: usize) -> Option<usize> {
        (index < self.len).then(|| self.len - 1 - index)
    }

    fn resize_buf(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len);
        let mut buf = vacant_buf(capacity);
        buf.iter_mut()
            .zip(&mut self.buf[..self.len])
            .for_each(|(dst, src)| *dst = src.take());
        self.buf = buf;
    }
}

fn vacant_buf<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T: PartialEq> ArrayStack<T> {
    pub fn contains(&self, x: &T) -> bool {
        self.iter().any(|value| value == x)
    }
}

impl<T> Sealed for ArrayStack<T> {}

impl<T> Enumerable for ArrayStack<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    fn instance(&self) -> u64 {
        self.instance
    }

    #[inline]
    fn seek(&self, position: usize) -> Option<(&T, Hint)> {
        self.get(position).ok().map(|value| (value, Hint::NONE))
    }
}

impl<T: Clone> Clone for ArrayStack<T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            len: self.len,
            version: 0,
            instance: next_instance(),
        }
    }
}

impl<T> Default for ArrayStack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: PartialEq> PartialEq for ArrayStack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for ArrayStack<T> {}

impl<T: hash::Hash> hash::Hash for ArrayStack<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|value| value.hash(state));
    }
}

impl<T> ops::Index<usize> for ArrayStack<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> ops::IndexMut<usize> for ArrayStack<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Extend<T> for ArrayStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push(value));
    }
}

impl<T> FromIterator<T> for ArrayStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<T> IntoIterator for ArrayStack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buf, self.len)
    }
}

impl<'a, T> IntoIterator for &'a ArrayStack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayStack<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Top-to-bottom iterator; [`next_back`](DoubleEndedIterator::next_back) walks up from
/// the bottom.
pub struct Iter<'a, T> {
    slots: slice::Iter<'a, Option<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.slots.next_back()?.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots.next()?.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

pub struct IterMut<'a, T> {
    slots: slice::IterMut<'a, Option<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.slots.next_back()?.as_mut()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots.next()?.as_mut()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EnumeratorError;

    fn vacant_slots<T>(s: &ArrayStack<T>) -> usize {
        s.buf.iter().filter(|slot| slot.is_none()).count()
    }

    #[test]
    fn growth() {
        assert_eq!(grown_capacity(1), 2);
        assert_eq!(grown_capacity(2), 3);
        assert_eq!(grown_capacity(5), 6);
        assert_eq!(grown_capacity(10), 12);

        let mut s = ArrayStack::new();
        assert_eq!(s.capacity(), 0);
        s.push(1);
        assert_eq!(s.capacity(), 2);
        s.push(2);
        assert_eq!(s.capacity(), 2);
        s.push(3);
        assert_eq!(s.capacity(), 4);
        for x in 4..=10 {
            s.push(x);
            assert!(s.capacity() >= s.len());
        }
        assert_eq!(s.len(), 10);
    }

    #[test]
    fn lifo() {
        let mut s = ArrayStack::new();
        for x in [5, 20, 10] {
            s.push(x);
        }
        assert_eq!(s.peek(), Ok(&10));
        assert_eq!(s.pop(), Ok(10));
        assert_eq!(s.pop(), Ok(20));
        assert_eq!(s.pop(), Ok(5));
        assert_eq!(s.pop(), Err(EmptyError));
        assert_eq!(s.peek(), Err(EmptyError));
        assert_eq!(s.remove_top(), Err(EmptyError));
    }

    #[test]
    fn removal_vacates_slots() {
        let mut s: ArrayStack<_> = ["a", "b", "c"].into_iter().map(String::from).collect();
        let capacity = s.capacity();
        assert_eq!(s.remove_top(), Ok(()));
        assert_eq!(s.pop().as_deref(), Ok("b"));
        assert_eq!(s.capacity(), capacity);
        assert_eq!(vacant_slots(&s), capacity - 1);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(vacant_slots(&s), capacity);
    }

    #[test]
    fn reserve_and_shrink() {
        let mut s: ArrayStack<_> = (0..5).collect();
        s.reserve(3);
        assert!(s.capacity() >= 5);
        s.reserve(20);
        assert_eq!(s.capacity(), 20);
        s.shrink_to_fit();
        assert_eq!(s.capacity(), s.len());
        assert!(s.is_full());
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), [4, 3, 2, 1, 0]);

        s.clear();
        s.shrink_to_fit();
        assert_eq!(s.capacity(), 0);
        s.push(7);
        assert_eq!(s.peek(), Ok(&7));
    }

    #[test]
    fn resize_is_not_a_modification() {
        let mut s: ArrayStack<_> = (0..3).collect();
        let mut e = s.enumerator();
        s.reserve(100);
        s.shrink_to_fit();
        assert_eq!(e.reset(&s), Ok(()));
    }

    #[test]
    fn reset_allows_pop_then_push() {
        let mut s: ArrayStack<_> = [1, 2].into_iter().collect();
        let mut e = s.enumerator();
        assert_eq!(e.move_next(&s), Some(&2));
        s.pop().unwrap();
        s.push(3);
        assert_eq!(e.current(&s), Ok(&3));
        assert_eq!(e.reset(&s), Ok(()));
        assert_eq!(e.move_next(&s), Some(&3));
        assert_eq!(e.move_next(&s), Some(&1));
    }

    #[test]
    fn top_relative_indexing() {
        let mut s: ArrayStack<_> = [5, 20, 10].into_iter().collect();
        assert_eq!(s[0], 10);
        assert_eq!(s[2], 5);
        assert_eq!(s.get(3), Err(IndexError { index: 3, len: 3 }));
        s[0] = 11;
        *s.get_mut(2).unwrap() = 6;
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), [11, 20, 6]);
        assert_eq!(s.iter().rev().copied().collect::<Vec<_>>(), [6, 20, 11]);
    }

    #[test]
    #[should_panic(expected = "index (is 0) should be < len (is 0)")]
    fn index_empty() {
        let s = ArrayStack::<u8>::with_capacity(4);
        let _value = s[0];
    }

    #[test]
    fn contains() {
        let mut s: ArrayStack<_> = [5, 20, 10, 50].into_iter().collect();
        s.remove_top().unwrap();
        assert!(!s.contains(&50));
        assert!(s.contains(&10));
    }

    #[test]
    fn copy_to_matches_indexing() {
        let s: ArrayStack<_> = [5u32, 20, 10].into_iter().collect();
        let mut exact = [0u64; 3];
        assert_eq!(s.copy_to(&mut exact, 0), Ok(()));
        assert_eq!(exact, [10, 20, 5]);
        let enumerated: Vec<u64> = {
            let mut e = s.enumerator();
            std::iter::from_fn(|| e.move_next(&s).map(|&x| u64::from(x))).collect()
        };
        assert_eq!(exact.as_slice(), enumerated.as_slice());

        let mut short = [0u64; 3];
        assert_eq!(
            s.copy_to(&mut short, 1),
            Err(CopyError::InsufficientSpace {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn enumerate() {
        let mut s: ArrayStack<_> = [5, 20, 10].into_iter().collect();
        let mut e = s.enumerator();
        assert_eq!(e.current(&s), Err(EnumeratorError::NotStarted));
        assert_eq!(e.move_next(&s), Some(&10));
        assert_eq!(e.move_next(&s), Some(&20));
        assert_eq!(e.move_next(&s), Some(&5));
        assert_eq!(e.move_next(&s), None);
        assert_eq!(e.current(&s), Err(EnumeratorError::Exhausted));

        s.push(1);
        assert_eq!(e.reset(&s), Err(EnumeratorError::Modified));
        // reads go through the live indexer, bounded by the captured length
        assert_eq!(e.move_next(&s), Some(&1));
        assert_eq!(e.move_next(&s), Some(&10));
        assert_eq!(e.move_next(&s), Some(&20));
        assert_eq!(e.move_next(&s), None);
    }

    #[test]
    fn traits() {
        let s: ArrayStack<_> = (1..=3).collect();
        let c = s.clone();
        assert_eq!(s, c);
        assert_eq!(
            s.enumerator().reset(&c),
            Err(EnumeratorError::ForeignContainer)
        );
        assert_eq!(format!("{s:?}"), "[3, 2, 1]");
        assert!(!s.is_synchronized());
        let mut m = c;
        for x in &mut m {
            *x += 1;
        }
        assert_eq!(m.into_iter().collect::<Vec<_>>(), [4, 3, 2]);
    }
}
