use std::{iter::FusedIterator, marker::PhantomData};

use crate::collections::{ArrayStack, EmptyError, LinkedStack, adapter::ContainerCommon};

pub trait StackLike<T>: ContainerCommon {
    fn push(&mut self, value: T);

    fn pop(&mut self) -> Result<T, EmptyError>;

    fn peek(&self) -> Result<&T, EmptyError>;

    fn peek_mut(&mut self) -> Result<&mut T, EmptyError>;

    #[inline]
    fn remove_top(&mut self) -> Result<(), EmptyError> {
        self.pop().map(drop)
    }
}

/// LIFO facade over any [`StackLike`] container, [`ArrayStack`] by default.
pub struct Stack<T, Container: StackLike<T> = ArrayStack<T>> {
    container: Container,
    _phantom_data: PhantomData<T>,
}

impl<T, Container: StackLike<T>> Stack<T, Container> {
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

    /// Pops until the stack is empty, most recent first.
    pub fn drain<'a>(&'a mut self) -> impl Iterator<Item = T> + 'a {
        struct Drain<'a, T, Container: StackLike<T>> {
            stack: &'a mut Stack<T, Container>,
        }
        impl<T, Container: StackLike<T>> Iterator for Drain<'_, T, Container> {
            type Item = T;

            #[inline]
            fn next(&mut self) -> Option<T> {
                self.stack.container.pop().ok()
            }
        }
        impl<T, Container: StackLike<T>> FusedIterator for Drain<'_, T, Container> {}
        Drain { stack: self }
    }
}

impl<T, Container: StackLike<T>> From<Container> for Stack<T, Container> {
    #[inline]
    fn from(value: Container) -> Self {
        Self::new(value)
    }
}

impl<T, Container: StackLike<T> + Default> Default for Stack<T, Container> {
    #[inline]
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl<T, Container: StackLike<T> + std::fmt::Debug> std::fmt::Debug for Stack<T, Container> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("container", &self.container)
            .finish()
    }
}

impl<T, Container: StackLike<T>> ContainerCommon for Stack<T, Container> {
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

impl<T, Container: StackLike<T>> StackLike<T> for Stack<T, Container> {
    #[inline]
    fn push(&mut self, value: T) {
        self.container.push(value)
    }

    #[inline]
    fn pop(&mut self) -> Result<T, EmptyError> {
        self.container.pop()
    }

    #[inline]
    fn peek(&self) -> Result<&T, EmptyError> {
        self.container.peek()
    }

    #[inline]
    fn peek_mut(&mut self) -> Result<&mut T, EmptyError> {
        self.container.peek_mut()
    }

    #[inline]
    fn remove_top(&mut self) -> Result<(), EmptyError> {
        self.container.remove_top()
    }
}

impl<T> StackLike<T> for LinkedStack<T> {
    #[inline]
    fn push(&mut self, value: T) {
        self.push(value)
    }

    #[inline]
    fn pop(&mut self) -> Result<T, EmptyError> {
        self.pop()
    }

    #[inline]
    fn peek(&self) -> Result<&T, EmptyError> {
        self.peek()
    }

    #[inline]
    fn peek_mut(&mut self) -> Result<&mut T, EmptyError> {
        self.peek_mut()
    }

    #[inline]
    fn remove_top(&mut self) -> Result<(), EmptyError> {
        self.remove_top()
    }
}

impl<T> StackLike<T> for ArrayStack<T> {
    #[inline]
    fn push(&mut self, value: T) {
        self.push(value)
    }

    #[inline]
    fn pop(&mut self) -> Result<T, EmptyError> {
        self.pop()
    }

    #[inline]
    fn peek(&self) -> Result<&T, EmptyError> {
        self.peek()
    }

    #[inline]
    fn peek_mut(&mut self) -> Result<&mut T, EmptyError> {
        self.peek_mut()
    }

    #[inline]
    fn remove_top(&mut self) -> Result<(), EmptyError> {
        self.remove_top()
    }
}

impl<T> StackLike<T> for Vec<T> {
    #[inline]
    fn push(&mut self, value: T) {
        self.push(value)
    }

    #[inline]
    fn pop(&mut self) -> Result<T, EmptyError> {
        self.pop().ok_or(EmptyError)
    }

    #[inline]
    fn peek(&self) -> Result<&T, EmptyError> {
        self.last().ok_or(EmptyError)
    }

    #[inline]
    fn peek_mut(&mut self) -> Result<&mut T, EmptyError> {
        self.last_mut().ok_or(EmptyError)
    }
}
