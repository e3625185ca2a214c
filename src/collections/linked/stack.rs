use std::{fmt, hash, iter::FusedIterator, marker::PhantomData, ops};

use crate::collections::{
    CopyError, EmptyError, Enumerable, Enumerator, IndexError,
    enumerator::{Hint, Sealed, next_instance},
    error::check_copy_room,
    linked::node::{self, Iter, IterMut, Link, Node},
};

/// LIFO stack over singly-linked nodes.
///
/// Indexing, iteration, enumeration and [`copy_to`](Self::copy_to) all run from the top:
/// position 0 is the most recently pushed element.
pub struct LinkedStack<T> {
    top: Link<T>,
    len: usize,
    version: u64,
    instance: u64,
    _marker: PhantomData<Box<Node<T>>>,
}

unsafe impl<T: Send> Send for LinkedStack<T> {}
unsafe impl<T: Sync> Sync for LinkedStack<T> {}

impl<T> LinkedStack<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            top: None,
            len: 0,
            version: 0,
            instance: next_instance(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn is_synchronized(&self) -> bool {
        false
    }

    pub fn push(&mut self, value: T) {
        self.top = Some(Node::alloc(value, self.top));
        self.len += 1;
        self.version = self.version.wrapping_add(1);
    }

    #[inline]
    pub fn peek(&self) -> Result<&T, EmptyError> {
        // SAFETY: nodes stay alive while `self` is borrowed.
        self.top
            .map(|node| unsafe { node::value(node) })
            .ok_or(EmptyError)
    }

    #[inline]
    pub fn peek_mut(&mut self) -> Result<&mut T, EmptyError> {
        // SAFETY: nodes stay alive while `self` is borrowed, and `&mut self` is exclusive.
        self.top
            .map(|node| unsafe { node::value_mut(node) })
            .ok_or(EmptyError)
    }

    pub fn pop(&mut self) -> Result<T, EmptyError> {
        let top = self.top.ok_or(EmptyError)?;
        // SAFETY: `top` is unlinked right here, so it is reclaimed exactly once.
        let Node { value, next } = unsafe { Node::free(top) };
        self.top = next;
        self.len -= 1;
        self.version = self.version.wrapping_add(1);
        Ok(value)
    }

    /// Removes the top element without returning it.
    #[inline]
    pub fn remove_top(&mut self) -> Result<(), EmptyError> {
        self.pop().map(drop)
    }

    /// Element `index` links below the top. O(n).
    pub fn get(&self, index: usize) -> Result<&T, IndexError> {
        self.iter().nth(index).ok_or(IndexError {
            index,
            len: self.len,
        })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
        let len = self.len;
        self.iter_mut().nth(index).ok_or(IndexError { index, len })
    }

    pub fn clear(&mut self) {
        let Some(top) = self.top.take() else {
            return;
        };
        self.len = 0;
        self.version = self.version.wrapping_add(1);
        // SAFETY: the chain was detached from `self` above.
        unsafe { node::free_chain(Some(top)) };
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
        // SAFETY: the chain is borrowed along with `self`.
        unsafe { Iter::new(self.top, self.len) }
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // SAFETY: the chain is exclusively borrowed along with `self`.
        unsafe { IterMut::new(self.top, self.len) }
    }
}

impl<T: PartialEq> LinkedStack<T> {
    pub fn contains(&self, x: &T) -> bool {
        self.iter().any(|value| value == x)
    }
}

impl<T> Sealed for LinkedStack<T> {}

impl<T> Enumerable for LinkedStack<T> {
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
        // SAFETY: the chain stays alive while `self` is borrowed.
        unsafe { node::seek(self.top, position) }
    }

    #[inline]
    unsafe fn step(&self, _position: usize, hint: Hint) -> Option<(&T, Hint)> {
        // SAFETY: the caller guarantees the hinted node is still on this stack.
        unsafe { node::step(hint) }
    }

    #[inline]
    unsafe fn resolve(&self, _position: usize, hint: Hint) -> Option<&T> {
        // SAFETY: as in `step`.
        unsafe { node::resolve(hint) }
    }
}

impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedStack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedStack<T> {
    fn clone(&self) -> Self {
        let mut stack = Self::new();
        let mut cursor = &mut stack.top;
        for value in self {
            let node = cursor.insert(Node::alloc(value.clone(), None));
            // SAFETY: `node` was just allocated and is owned by `stack`.
            cursor = unsafe { &mut node.as_mut().next };
        }
        stack.len = self.len;
        stack
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedStack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for LinkedStack<T> {}

impl<T: hash::Hash> hash::Hash for LinkedStack<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|value| value.hash(state));
    }
}

impl<T> ops::Index<usize> for LinkedStack<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> ops::IndexMut<usize> for LinkedStack<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Pushes in iteration order, so the last item ends up on top.
impl<T> Extend<T> for LinkedStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push(value));
    }
}

impl<T> FromIterator<T> for LinkedStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<T> IntoIterator for LinkedStack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { stack: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedStack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedStack<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

pub struct IntoIter<T> {
    stack: LinkedStack<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.stack.pop().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len, Some(self.stack.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.stack).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::EnumeratorError;

    fn stack_of(values: &[i32]) -> LinkedStack<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn lifo() {
        let mut s = LinkedStack::new();
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
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn remove_top_and_contains() {
        let mut s = stack_of(&[5, 20, 10, 50]);
        assert_eq!(s.remove_top(), Ok(()));
        assert!(!s.contains(&50));
        assert!(s.contains(&10));
        assert_eq!(s.pop(), Ok(10));
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), [20, 5]);
    }

    #[test]
    fn indexing() {
        let mut s = stack_of(&[5, 20, 10]);
        assert_eq!(s.get(0), Ok(&10));
        assert_eq!(s[1], 20);
        assert_eq!(s[2], 5);
        assert_eq!(s.get(3), Err(IndexError { index: 3, len: 3 }));
        s[2] = 6;
        *s.peek_mut().unwrap() = 11;
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), [11, 20, 6]);
    }

    #[test]
    #[should_panic(expected = "index (is 3) should be < len (is 3)")]
    fn index_out_of_range() {
        let s = stack_of(&[5, 20, 10]);
        let _value = s[3];
    }

    #[test]
    fn clear() {
        let mut s = stack_of(&[1, 2, 3]);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.iter().next(), None);
        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    fn long_chain_drop() {
        let s: LinkedStack<_> = (0..200_000).collect();
        drop(s);
    }

    #[test]
    fn copy_to() {
        let s = stack_of(&[5, 20, 10]);
        let mut exact = [0; 3];
        assert_eq!(s.copy_to(&mut exact, 0), Ok(()));
        assert_eq!(exact, [10, 20, 5]);

        let mut short = [0; 2];
        assert_eq!(
            s.copy_to(&mut short, 0),
            Err(CopyError::InsufficientSpace {
                required: 3,
                available: 2
            })
        );
        assert_eq!(short, [0; 2]);
    }

    #[test]
    fn enumerate() {
        let mut s = stack_of(&[5, 20, 10]);
        let mut e = s.enumerator();
        let mut seen = Vec::new();
        while let Some(x) = e.move_next(&s) {
            seen.push(*x);
            assert_eq!(e.current(&s), Ok(x));
        }
        assert_eq!(seen, [10, 20, 5]);

        s.pop().unwrap();
        assert_eq!(e.reset(&s), Err(EnumeratorError::Modified));
        assert_eq!(e.current(&s), Err(EnumeratorError::NotStarted));

        let mut e = s.enumerator();
        assert_eq!(e.reset(&s), Ok(()));
        assert_eq!(e.move_next(&s), Some(&20));
    }

    #[test]
    fn reset_allows_pop_then_push() {
        let mut s = stack_of(&[1, 2]);
        let mut e = s.enumerator();
        s.pop().unwrap();
        s.push(3);
        assert_eq!(s.len(), e.captured_len());
        assert_eq!(e.reset(&s), Ok(()));
        assert_eq!(e.move_next(&s), Some(&3));
        assert_eq!(e.move_next(&s), Some(&1));
        assert_eq!(e.move_next(&s), None);
    }

    #[test]
    fn long_chain_enumeration() {
        let s: LinkedStack<u64> = (0..200_000).collect();
        let mut e = s.enumerator();
        let mut expected = 200_000;
        while let Some(&x) = e.move_next(&s) {
            expected -= 1;
            assert_eq!(x, expected);
        }
        assert_eq!(expected, 0);
        assert_eq!(e.current(&s), Err(EnumeratorError::Exhausted));
    }

    #[test]
    fn enumerator_rereads_after_pop() {
        let mut s = stack_of(&[1, 2, 3]);
        let mut e = s.enumerator();
        assert_eq!(e.move_next(&s), Some(&3));
        assert_eq!(e.move_next(&s), Some(&2));
        s.pop().unwrap();
        assert_eq!(e.current(&s), Ok(&1));
        s[0] = 20;
        assert_eq!(e.move_next(&s), None);
        assert_eq!(e.reset(&s), Err(EnumeratorError::Modified));
        assert_eq!(e.move_next(&s), Some(&20));
    }

    #[test]
    fn clone_keeps_order() {
        let s = stack_of(&[1, 2, 3]);
        let c = s.clone();
        assert_eq!(s, c);
        assert_eq!(c.len(), 3);
        assert_eq!(format!("{c:?}"), "[3, 2, 1]");
        let mut e = s.enumerator();
        assert_eq!(e.reset(&c), Err(EnumeratorError::ForeignContainer));
        assert_eq!(e.reset(&s), Ok(()));
        assert_eq!(c.into_iter().collect::<Vec<_>>(), [3, 2, 1]);
    }
}
