#[cfg(feature = "collections")]
pub mod collections;

#[cfg(feature = "collections")]
pub use collections::{
    ArrayStack, CopyError, EmptyError, Enumerable, Enumerator, EnumeratorError, IndexError,
    LinkedQueue, LinkedStack,
};

#[cfg(all(test, feature = "collections"))]
mod tests {
    use super::*;

    fn drain<C: Enumerable<Item = i32>>(container: &C) -> Vec<i32> {
        let mut e = Enumerator::new(container);
        std::iter::from_fn(|| e.move_next(container).copied()).collect()
    }

    #[test]
    fn stack_walkthrough() {
        let mut stack = LinkedStack::new();
        stack.push(5);
        stack.push(20);
        assert_eq!(stack.peek(), Ok(&20));
        stack.push(10);
        stack.push(50);
        stack.remove_top().unwrap();
        assert!(!stack.contains(&50));
        assert!(stack.contains(&10));
        assert_eq!(stack.pop(), Ok(10));
        assert_eq!((0..stack.len()).map(|i| stack[i]).collect::<Vec<_>>(), [20, 5]);
        assert_eq!(drain(&stack), [20, 5]);
        assert_eq!(stack.iter().count(), 2);
        stack.clear();
        assert!(drain(&stack).is_empty());
        assert!(stack.is_empty());
    }

    #[test]
    fn same_pushes_every_container() {
        let mut linked = LinkedStack::new();
        let mut array = ArrayStack::new();
        let mut queue = LinkedQueue::new();
        for x in [5, 20, 10] {
            linked.push(x);
            array.push(x);
            queue.enqueue(x);
        }
        assert_eq!(drain(&linked), [10, 20, 5]);
        assert_eq!(drain(&array), [10, 20, 5]);
        assert_eq!(drain(&queue), [5, 20, 10]);

        let mut dst = [0; 3];
        linked.copy_to(&mut dst, 0).unwrap();
        assert_eq!(dst.as_slice(), drain(&linked));
        array.copy_to(&mut dst, 0).unwrap();
        assert_eq!(dst.as_slice(), drain(&array));
        queue.copy_to(&mut dst, 0).unwrap();
        assert_eq!(dst.as_slice(), drain(&queue));
    }

    #[test]
    fn reset_after_mutation() {
        let mut array: ArrayStack<_> = (0..4).collect();
        let mut e = array.enumerator();
        assert!(e.move_next(&array).is_some());
        array.remove_top().unwrap();
        assert_eq!(e.reset(&array), Err(EnumeratorError::Modified));
    }

    #[test]
    fn counts_never_underflow() {
        let mut queue = LinkedQueue::<u8>::new();
        let mut stack = ArrayStack::<u8>::new();
        assert_eq!(queue.dequeue(), Err(EmptyError));
        assert_eq!(stack.pop(), Err(EmptyError));
        assert_eq!(queue.len(), 0);
        assert_eq!(stack.len(), 0);
    }
}
