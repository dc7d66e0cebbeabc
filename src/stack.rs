use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("stack is full")]
pub struct StackFull;

/// Fixed-capacity LIFO container.
///
/// The capacity is reserved up front and never grows: a push onto a full
/// stack fails with [`StackFull`] instead of reallocating.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Reserves room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity)?;
        Ok(Self { items, capacity })
    }

    pub fn push(&mut self, item: T) -> Result<(), StackFull> {
        if self.items.len() == self.capacity {
            return Err(StackFull);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}
