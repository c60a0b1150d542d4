//! Distance functions

use crate::error::{HopfieldError, Result};

/// Number of positions at which `a` and `b` differ
pub fn hamming<T: PartialEq>(a: &[T], b: &[T]) -> Result<usize> {
    if a.len() != b.len() {
        return Err(HopfieldError::shape(a.len(), b.len()));
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}
