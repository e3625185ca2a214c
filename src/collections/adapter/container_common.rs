use std::collections::VecDeque;

use crate::collections::{ArrayStack, LinkedQueue, LinkedStack};

pub trait ContainerCommon {
    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Containers in this crate never lock; `true` would mean callers may share one
    /// across threads without their own synchronization.
    #[inline]
    fn is_synchronized(&self) -> bool {
        false
    }
}

impl<T> ContainerCommon for LinkedQueue<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        usize::MAX
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    fn is_full(&self) -> bool {
        false
    }
}

impl<T> ContainerCommon for LinkedStack<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        usize::MAX
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    fn is_full(&self) -> bool {
        false
    }
}

/// `is_full` reports a full buffer; the next push reallocates.
impl<T> ContainerCommon for ArrayStack<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ContainerCommon for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<T> ContainerCommon for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}
