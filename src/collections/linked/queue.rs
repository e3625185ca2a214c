use std::{fmt, hash, iter::FusedIterator, marker::PhantomData};

use crate::collections::{
    CopyError, EmptyError, Enumerable, Enumerator, IndexError,
    enumerator::{Hint, Sealed, next_instance},
    error::check_copy_room,
    linked::node::{self, Iter, IterMut, Link, Node},
};

/// FIFO queue over singly-linked nodes.
///
/// Every node is allocated by [`enqueue`] and released by [`dequeue`], [`clear`] or
/// drop. `head` owns the chain; `tail` aliases its last node so appending is O(1).
///
/// [`enqueue`]: Self::enqueue
/// [`dequeue`]: Self::dequeue
/// [`clear`]: Self::clear
pub struct LinkedQueue<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    version: u64,
    instance: u64,
    _marker: PhantomData<Box<Node<T>>>,
}

unsafe impl<T: Send> Send for LinkedQueue<T> {}
unsafe impl<T: Sync> Sync for LinkedQueue<T> {}

impl<T> LinkedQueue<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
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

    /// Always `false`: the queue performs no internal synchronization.
    #[inline]
    pub const fn is_synchronized(&self) -> bool {
        false
    }

    pub fn enqueue(&mut self, value: T) {
        let node = Node::alloc(value, None);
        match self.tail {
            // SAFETY: `tail` points at the last live node of this queue.
            Some(mut tail) => unsafe { tail.as_mut() }.next = Some(node),
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        self.version = self.version.wrapping_add(1);
    }

    pub fn dequeue(&mut self) -> Result<T, EmptyError> {
        let head = self.head.ok_or(EmptyError)?;
        // SAFETY: `head` is unlinked right here, so it is reclaimed exactly once.
        let node = unsafe { Node::free(head) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        self.version = self.version.wrapping_add(1);
        Ok(node.value)
    }

    /// Oldest element, the one [`dequeue`](Self::dequeue) would return.
    #[inline]
    pub fn peek(&self) -> Result<&T, EmptyError> {
        self.front().ok_or(EmptyError)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        // SAFETY: nodes stay alive while `self` is borrowed.
        self.head.map(|node| unsafe { node::value(node) })
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: nodes stay alive while `self` is borrowed, and `&mut self` is exclusive.
        self.head.map(|node| unsafe { node::value_mut(node) })
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        // SAFETY: see `front`.
        self.tail.map(|node| unsafe { node::value(node) })
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        // SAFETY: see `front_mut`.
        self.tail.map(|node| unsafe { node::value_mut(node) })
    }

    /// Element `index` positions behind the front. O(n).
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
        let Some(head) = self.head.take() else {
            return;
        };
        self.tail = None;
        self.len = 0;
        self.version = self.version.wrapping_add(1);
        // SAFETY: the chain was detached from `self` above.
        unsafe { node::free_chain(Some(head)) };
    }

    /// Copies the elements front-to-back into `dst[index..]`.
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
        unsafe { Iter::new(self.head, self.len) }
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // SAFETY: the chain is exclusively borrowed along with `self`.
        unsafe { IterMut::new(self.head, self.len) }
    }
}

impl<T: PartialEq> LinkedQueue<T> {
    pub fn contains(&self, x: &T) -> bool {
        self.iter().any(|value| value == x)
    }
}

impl<T> Sealed for LinkedQueue<T> {}

impl<T> Enumerable for LinkedQueue<T> {
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
        unsafe { node::seek(self.head, position) }
    }

    #[inline]
    unsafe fn step(&self, _position: usize, hint: Hint) -> Option<(&T, Hint)> {
        // SAFETY: the caller guarantees the hinted node is still in this queue.
        unsafe { node::step(hint) }
    }

    #[inline]
    unsafe fn resolve(&self, _position: usize, hint: Hint) -> Option<&T> {
        // SAFETY: as in `step`.
        unsafe { node::resolve(hint) }
    }
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedQueue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedQueue<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for LinkedQueue<T> {}

impl<T: hash::Hash> hash::Hash for LinkedQueue<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|value| value.hash(state));
    }
}

impl<T> Extend<T> for LinkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.enqueue(value));
    }
}

impl<T> FromIterator<T> for LinkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T> IntoIterator for LinkedQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedQueue<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

pub struct IntoIter<T> {
    queue: LinkedQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.queue.dequeue().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.queue).finish()
    }
}
