#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("container is empty")]
pub struct EmptyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("index (is {index}) should be < len (is {len})")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CopyError {
    #[error("start index (is {index}) should be <= destination len (is {dst_len})")]
    IndexOutOfRange { index: usize, dst_len: usize },
    #[error("destination has room for {available} elements (needs {required})")]
    InsufficientSpace { required: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum EnumeratorError {
    #[error("enumerator has not been advanced yet")]
    NotStarted,
    #[error("enumerator is past the end of the sequence")]
    Exhausted,
    #[error("container was modified after the enumerator was created")]
    Modified,
    #[error("enumerator was created from a different container")]
    ForeignContainer,
}

/// Checks that `dst[index..]` can hold `required` elements.
pub(crate) fn check_copy_room(
    dst_len: usize,
    index: usize,
    required: usize,
) -> Result<(), CopyError> {
    let available = dst_len
        .checked_sub(index)
        .ok_or(CopyError::IndexOutOfRange { index, dst_len })?;
    if available < required {
        return Err(CopyError::InsufficientSpace {
            required,
            available,
        });
    }
    Ok(())
}
