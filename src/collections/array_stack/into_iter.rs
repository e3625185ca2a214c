use core::{fmt, iter::FusedIterator};

/// Owning iterator of an [`ArrayStack`](super::ArrayStack), yielding top-to-bottom.
#[derive(Clone)]
pub struct IntoIter<T> {
    buf: Box<[Option<T>]>,
    // alive slots are `bottom..top`
    bottom: usize,
    top: usize,
}

impl<T> IntoIter<T> {
    #[inline(always)]
    pub(crate) fn new(buf: Box<[Option<T>]>, len: usize) -> Self {
        Self {
            buf,
            bottom: 0,
            top: len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alive = self.buf[self.bottom..self.top].iter().rev().flatten();
        f.debug_tuple("IntoIter")
            .field(&alive.collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.len() == 0 {
            return None;
        }
        self.top -= 1;
        self.buf[self.top].take()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.len() == 0 {
            return None;
        }
        let value = self.buf[self.bottom].take();
        self.bottom += 1;
        value
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.top - self.bottom
    }
}

impl<T> FusedIterator for IntoIter<T> {}
