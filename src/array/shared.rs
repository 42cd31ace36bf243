//! Shared array
//!
//! External locking around any backend so it can be used from several
//! threads. Every call takes the lock; use `with` to batch.

use std::marker::PhantomData;

use parking_lot::Mutex;

use crate::element::Element;
use crate::error::Result;

use super::HugeArray;

/// Thread-safe wrapper serializing all access to an array
pub struct SharedArray<T: Element, A: HugeArray<T>> {
    inner: Mutex<A>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element, A: HugeArray<T>> SharedArray<T, A> {
    pub fn new(array: A) -> Self {
        Self {
            inner: Mutex::new(array),
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> u64 {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: u64) -> Result<T> {
        self.inner.lock().get(index)
    }

    pub fn set(&self, index: u64, value: T) -> Result<()> {
        self.inner.lock().set(index, value)
    }

    pub fn resize(&self, new_len: u64) -> Result<()> {
        self.inner.lock().resize(new_len)
    }

    /// Run `f` with the lock held for the whole call
    pub fn with<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    pub fn into_inner(self) -> A {
        self.inner.into_inner()
    }

    /// Unwrap and release the wrapped array
    pub fn release(self) -> Result<()> {
        self.into_inner().release()
    }
}
