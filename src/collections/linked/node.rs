use std::{iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use crate::collections::enumerator::Hint;

pub(super) type Link<T> = Option<NonNull<Node<T>>>;

/// One element of a singly-linked chain. A chain owns every node reachable from its
/// first link; nodes are only ever created by [`Node::alloc`] and released by
/// [`Node::free`].
pub(super) struct Node<T> {
    pub(super) value: T,
    pub(super) next: Link<T>,
}

impl<T> Node<T> {
    #[inline]
    pub(super) fn alloc(value: T, next: Link<T>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Self { value, next })))
    }

    /// # Safety
    ///
    /// `node` must come from [`alloc`](Self::alloc), be unlinked from its chain, and not
    /// be freed before.
    #[inline]
    pub(super) unsafe fn free(node: NonNull<Self>) -> Self {
        *unsafe { Box::from_raw(node.as_ptr()) }
    }
}

/// Releases every node from `link` onwards, front to back.
///
/// # Safety
///
/// The chain must be detached from its container and owned by the caller.
pub(super) unsafe fn free_chain<T>(mut link: Link<T>) {
    while let Some(node) = link {
        // SAFETY: every node of the detached chain is visited once.
        link = unsafe { Node::free(node) }.next;
    }
}

/// # Safety
///
/// `node` must be live for `'a`.
#[inline]
pub(super) unsafe fn value<'a, T>(node: NonNull<Node<T>>) -> &'a T {
    unsafe { &(*node.as_ptr()).value }
}

/// # Safety
///
/// `node` must be live for `'a`, with no other reference to its value.
#[inline]
pub(super) unsafe fn value_mut<'a, T>(node: NonNull<Node<T>>) -> &'a mut T {
    unsafe { &mut (*node.as_ptr()).value }
}

/// Node `position` links after `first`, and its [`Hint`].
///
/// # Safety
///
/// The chain starting at `first` must be live for `'a`.
pub(super) unsafe fn seek<'a, T>(first: Link<T>, position: usize) -> Option<(&'a T, Hint)> {
    let mut link = first;
    for _ in 0..position {
        // SAFETY: guaranteed by the caller.
        link = unsafe { link?.as_ref() }.next;
    }
    let node = link?;
    // SAFETY: as above.
    Some((unsafe { value(node) }, Hint::node(node)))
}

/// Successor of the node `hint` names.
///
/// # Safety
///
/// `hint` must name a node that is still linked into a chain live for `'a`.
pub(super) unsafe fn step<'a, T>(hint: Hint) -> Option<(&'a T, Hint)> {
    let previous = hint.as_node::<Node<T>>()?;
    // SAFETY: guaranteed by the caller.
    let node = unsafe { previous.as_ref() }.next?;
    // SAFETY: `node` is linked after a live node, so it is live too.
    Some((unsafe { value(node) }, Hint::node(node)))
}

/// # Safety
///
/// Same as [`step`].
pub(super) unsafe fn resolve<'a, T>(hint: Hint) -> Option<&'a T> {
    let node = hint.as_node::<Node<T>>()?;
    // SAFETY: guaranteed by the caller.
    Some(unsafe { value(node) })
}

/// Borrowing iterator from the first link of a chain to its end.
pub struct Iter<'a, T> {
    next: Link<T>,
    len: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<T> Iter<'_, T> {
    /// # Safety
    ///
    /// The `len` nodes of the chain at `first` must stay live and unmodified for `'a`.
    #[inline]
    pub(super) unsafe fn new(first: Link<T>, len: usize) -> Self {
        Self {
            next: first,
            len,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|node| {
            // SAFETY: the chain is borrowed for `'a`, so its nodes outlive this reference.
            let node = unsafe { &*node.as_ptr() };
            self.next = node.next;
            self.len -= 1;
            &node.value
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

pub struct IterMut<'a, T> {
    next: Link<T>,
    len: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<T> IterMut<'_, T> {
    /// # Safety
    ///
    /// The `len` nodes of the chain at `first` must be exclusively borrowed for `'a`.
    #[inline]
    pub(super) unsafe fn new(first: Link<T>, len: usize) -> Self {
        Self {
            next: first,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.next.map(|node| {
            // SAFETY: the chain is mutably borrowed for `'a` and every node is yielded once.
            let node = unsafe { &mut *node.as_ptr() };
            self.next = node.next;
            self.len -= 1;
            &mut node.value
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(values: &[i32]) -> Link<i32> {
        values
            .iter()
            .rev()
            .fold(None, |next, &value| Some(Node::alloc(value, next)))
    }

    #[test]
    fn seek_then_step() {
        let first = chain(&[1, 2, 3]);
        // SAFETY: the chain is freed only at the end of the test.
        unsafe {
            let (value, hint) = seek(first, 1).unwrap();
            assert_eq!(*value, 2);
            assert_eq!(resolve::<i32>(hint), Some(&2));
            let (value, hint) = step::<i32>(hint).unwrap();
            assert_eq!(*value, 3);
            assert_eq!(step::<i32>(hint), None);
            assert_eq!(seek::<i32>(first, 3), None);
            assert_eq!(Iter::new(first, 3).copied().collect::<Vec<_>>(), [1, 2, 3]);
            free_chain(first);
        }
    }
}
