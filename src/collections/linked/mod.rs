mod node;
pub mod queue;
pub mod stack;

pub use node::{Iter, IterMut};
pub use queue::LinkedQueue;
pub use stack::LinkedStack;
