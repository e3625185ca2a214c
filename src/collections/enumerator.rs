use std::{
    fmt,
    marker::PhantomData,
    ptr::NonNull,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::collections::EnumeratorError;

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;

/// Identity for a newly constructed container, never handed out twice in a process.
pub(crate) fn next_instance() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Where the element last found by [`Enumerable::seek`] or [`Enumerable::step`] lives.
///
/// Opaque outside the crate. Linked containers store the node address, indexed ones
/// store nothing.
#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint(Option<NonNull<()>>);

// SAFETY: the address is only dereferenced through a borrow of the container owning it.
unsafe impl Send for Hint {}
unsafe impl Sync for Hint {}

impl Hint {
    pub(crate) const NONE: Self = Self(None);

    #[inline]
    pub(crate) fn node<N>(node: NonNull<N>) -> Self {
        Self(Some(node.cast()))
    }

    #[inline]
    pub(crate) fn as_node<N>(self) -> Option<NonNull<N>> {
        self.0.map(NonNull::cast)
    }
}

/// A container that can be walked by an [`Enumerator`].
///
/// Implemented by [`LinkedQueue`], [`LinkedStack`] and [`ArrayStack`] only.
///
/// [`LinkedQueue`]: crate::collections::LinkedQueue
/// [`LinkedStack`]: crate::collections::LinkedStack
/// [`ArrayStack`]: crate::collections::ArrayStack
pub trait Enumerable: Sealed {
    type Item;

    /// Number of elements currently stored.
    fn len(&self) -> usize;

    /// Mutation counter, bumped by every structural change.
    fn version(&self) -> u64;

    /// Identity of this container. Clones get a fresh one, moves keep it.
    fn instance(&self) -> u64;

    /// Element at `position` in enumeration order, found from the start.
    #[doc(hidden)]
    fn seek(&self, position: usize) -> Option<(&Self::Item, Hint)>;

    /// Element at `position`, reached from the one at `position - 1`.
    ///
    /// # Safety
    ///
    /// `hint` must have been returned for `position - 1` by [`seek`](Self::seek) or
    /// `step` on this same container, and [`version`](Self::version) must not have
    /// changed since.
    #[doc(hidden)]
    #[inline]
    unsafe fn step(&self, position: usize, _hint: Hint) -> Option<(&Self::Item, Hint)> {
        self.seek(position)
    }

    /// Element at `position`, the one `hint` was returned with.
    ///
    /// # Safety
    ///
    /// Same as [`step`](Self::step), with `hint` returned for `position` itself.
    #[doc(hidden)]
    #[inline]
    unsafe fn resolve(&self, position: usize, _hint: Hint) -> Option<&Self::Item> {
        self.seek(position).map(|(value, _)| value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Position {
    BeforeFirst,
    At(usize),
    AfterLast,
}

/// Detached, forward-only cursor over an [`Enumerable`] container.
///
/// The enumerator holds no borrow: it keeps the identity and length of the container it
/// was created from, and each call takes that container again. [`reset`] fails once the
/// length has changed; [`move_next`] reads the live container, bounded by the length
/// captured at creation, and advances one link per call while the container is
/// structurally unchanged.
///
/// [`reset`]: Self::reset
/// [`move_next`]: Self::move_next
pub struct Enumerator<C: ?Sized> {
    instance: u64,
    len: usize,
    position: Position,
    // hint for `position`, usable while the container version still matches
    resume: Option<(u64, Hint)>,
    _container: PhantomData<fn(&C)>,
}

impl<C: Enumerable + ?Sized> Enumerator<C> {
    #[inline]
    pub fn new(container: &C) -> Self {
        Self {
            instance: container.instance(),
            len: container.len(),
            position: Position::BeforeFirst,
            resume: None,
            _container: PhantomData,
        }
    }

    /// Length of the container when the enumerator was created.
    #[inline]
    pub const fn captured_len(&self) -> usize {
        self.len
    }

    /// Advances to the next element. Returns `None` once the captured length is used up,
    /// the live container has nothing at the new position, or `container` is not the
    /// one this enumerator was created from.
    pub fn move_next<'c>(&mut self, container: &'c C) -> Option<&'c C::Item> {
        let next = match self.position {
            Position::BeforeFirst => 0,
            Position::At(position) => position + 1,
            Position::AfterLast => return None,
        };
        let found = if next < self.len && container.instance() == self.instance {
            match self.resume {
                // SAFETY: the hint was returned for `next - 1` by this same container, and
                // its version proves no node was unlinked since.
                Some((version, hint)) if version == container.version() => unsafe {
                    container.step(next, hint)
                },
                _ => container.seek(next),
            }
        } else {
            None
        };
        match found {
            Some((value, hint)) => {
                self.position = Position::At(next);
                self.resume = Some((container.version(), hint));
                Some(value)
            }
            None => {
                self.position = Position::AfterLast;
                self.resume = None;
                None
            }
        }
    }

    pub fn current<'c>(&self, container: &'c C) -> Result<&'c C::Item, EnumeratorError> {
        if container.instance() != self.instance {
            return Err(EnumeratorError::ForeignContainer);
        }
        let position = match self.position {
            Position::BeforeFirst => return Err(EnumeratorError::NotStarted),
            Position::AfterLast => return Err(EnumeratorError::Exhausted),
            Position::At(position) => position,
        };
        let value = match self.resume {
            // SAFETY: see `move_next`, the hint was returned for `position` itself.
            Some((version, hint)) if version == container.version() => unsafe {
                container.resolve(position, hint)
            },
            _ => container.seek(position).map(|(value, _)| value),
        };
        // the container shrank under the cursor
        value.ok_or(EnumeratorError::Modified)
    }

    /// Rewinds to before the first element. The rewind happens even when the container's
    /// length differs from the captured one, in which case [`EnumeratorError::Modified`]
    /// is returned.
    pub fn reset(&mut self, container: &C) -> Result<(), EnumeratorError> {
        self.position = Position::BeforeFirst;
        self.resume = None;
        if container.instance() != self.instance {
            return Err(EnumeratorError::ForeignContainer);
        }
        if container.len() != self.len {
            return Err(EnumeratorError::Modified);
        }
        Ok(())
    }
}

impl<C: ?Sized> Clone for Enumerator<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for Enumerator<C> {}

impl<C: ?Sized> fmt::Debug for Enumerator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerator")
            .field("len", &self.len)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
