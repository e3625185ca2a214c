use std::{collections::VecDeque, iter::FusedIterator, marker::PhantomData};

use crate::collections::{EmptyError, LinkedQueue, adapter::ContainerCommon};

pub trait QueueLike<T>: ContainerCommon {
    fn enqueue(&mut self, value: T);

    fn dequeue(&mut self) -> Result<T, EmptyError>;

    fn front(&self) -> Option<&T>;

    fn front_mut(&mut self) -> Option<&mut T>;

    fn back(&self) -> Option<&T>;

    fn back_mut(&mut self) -> Option<&mut T>;

    #[inline]
    fn peek(&self) -> Result<&T, EmptyError> {
        self.front().ok_or(EmptyError)
    }
}

/// FIFO facade over any [`QueueLike`] container, [`LinkedQueue`] by default.
pub struct Queue<T, Container: QueueLike<T> = LinkedQueue<T>> {
    container: Container,
    _phantom_data: PhantomData<T>,
}

impl<T, Container: QueueLike<T>> Queue<T, Container> {
    #[inline]
    pub fn new(container: Container) -> Self {
        Self {
            container,
            _phantom_data: PhantomData,
        }
    }

    #[inline]
    pub fn inner(&self) -> &Container {
        &self.container
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    #[inline]
    pub fn into_inner(self) -> Container {
        self.container
    }

    /// Dequeues until the queue is empty, oldest first.
    pub fn drain<'a>(&'a mut self) -> impl Iterator<Item = T> + 'a {
        struct Drain<'a, T, Container: QueueLike<T>> {
            queue: &'a mut Queue<T, Container>,
        }
        impl<T, Container: QueueLike<T>> Iterator for Drain<'_, T, Container> {
            type Item = T;

            #[inline]
            fn next(&mut self) -> Option<T> {
                self.queue.container.dequeue().ok()
            }
        }
        impl<T, Container: QueueLike<T>> FusedIterator for Drain<'_, T, Container> {}
        Drain { queue: self }
    }
}

impl<T, Container: QueueLike<T>> From<Container> for Queue<T, Container> {
    #[inline]
    fn from(value: Container) -> Self {
        Self::new(value)
    }
}

impl<T, Container: QueueLike<T> + Default> Default for Queue<T, Container> {
    #[inline]
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl<T, Container: QueueLike<T> + std::fmt::Debug> std::fmt::Debug for Queue<T, Container> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queue")
            .field("container", &self.container)
            .finish()
    }
}

impl<T, Container: QueueLike<T>> ContainerCommon for Queue<T, Container> {
    #[inline]
    fn len(&self) -> usize {
        self.container.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.container.capacity()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.container.is_full()
    }
}

impl<T, Container: QueueLike<T>> QueueLike<T> for Queue<T, Container> {
    #[inline]
    fn enqueue(&mut self, value: T) {
        self.container.enqueue(value)
    }

    #[inline]
    fn dequeue(&mut self) -> Result<T, EmptyError> {
        self.container.dequeue()
    }

    #[inline]
    fn front(&self) -> Option<&T> {
        self.container.front()
    }

    #[inline]
    fn front_mut(&mut self) -> Option<&mut T> {
        self.container.front_mut()
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        self.container.back()
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        self.container.back_mut()
    }
}

impl<T> QueueLike<T> for LinkedQueue<T> {
    #[inline]
    fn enqueue(&mut self, value: T) {
        self.enqueue(value)
    }

    #[inline]
    fn dequeue(&mut self) -> Result<T, EmptyError> {
        self.dequeue()
    }

    #[inline]
    fn front(&self) -> Option<&T> {
        self.front()
    }

    #[inline]
    fn front_mut(&mut self) -> Option<&mut T> {
        self.front_mut()
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        self.back()
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        self.back_mut()
    }
}

impl<T> QueueLike<T> for VecDeque<T> {
    #[inline]
    fn enqueue(&mut self, value: T) {
        self.push_back(value)
    }

    #[inline]
    fn dequeue(&mut self) -> Result<T, EmptyError> {
        self.pop_front().ok_or(EmptyError)
    }

    #[inline]
    fn front(&self) -> Option<&T> {
        self.front()
    }

    #[inline]
    fn front_mut(&mut self) -> Option<&mut T> {
        self.front_mut()
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        self.back()
    }

    #[inline]
    fn back_mut(&mut self) -> Option<&mut T> {
        self.back_mut()
    }
}
