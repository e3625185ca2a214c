#[cfg(feature = "collections_adapter")]
pub mod adapter;
#[cfg(feature = "collections_adapter")]
pub use adapter::{ContainerCommon, Queue, QueueLike, Stack, StackLike};

pub mod array_stack;
pub mod enumerator;
pub mod error;
pub mod linked;

pub use array_stack::ArrayStack;
pub use enumerator::{Enumerable, Enumerator};
pub use error::{CopyError, EmptyError, EnumeratorError, IndexError};
pub use linked::{LinkedQueue, LinkedStack};
