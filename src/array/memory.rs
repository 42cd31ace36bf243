//! In-memory array backend
//!
//! `Vec`-backed implementation of the huge-array contract.

use crate::element::Element;
use crate::error::{HugeArrayError, Result};

use super::HugeArray;

/// Heap-allocated array of `T`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryArray<T: Element> {
    data: Vec<T>,
}

impl<T: Element> MemoryArray<T> {
    /// Create an array of `len` default elements
    pub fn new(len: u64) -> Result<Self> {
        Ok(Self {
            data: vec![T::default(); Self::to_usize(len)?],
        })
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn to_usize(len: u64) -> Result<usize> {
        usize::try_from(len).map_err(|_| {
            HugeArrayError::Storage(format!("{} elements exceed the address space", len))
        })
    }

    fn slot(&self, index: u64) -> Result<usize> {
        match usize::try_from(index) {
            Ok(slot) if slot < self.data.len() => Ok(slot),
            _ => Err(HugeArrayError::IndexOutOfRange {
                index,
                len: self.data.len() as u64,
            }),
        }
    }
}

impl<T: Element> HugeArray<T> for MemoryArray<T> {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn resize(&mut self, new_len: u64) -> Result<()> {
        let new_len = Self::to_usize(new_len)?;
        let shrinking = new_len < self.data.len();
        self.data.resize(new_len, T::default());
        if shrinking {
            self.data.shrink_to_fit();
        }
        Ok(())
    }

    fn get(&mut self, index: u64) -> Result<T> {
        let slot = self.slot(index)?;
        Ok(self.data[slot])
    }

    fn set(&mut self, index: u64, value: T) -> Result<()> {
        let slot = self.slot(index)?;
        self.data[slot] = value;
        Ok(())
    }

    fn release(self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_fills_default() {
        let mut array = MemoryArray::<i16>::from_vec(vec![1, 2, 3]);
        array.resize(5).unwrap();
        assert_eq!(array.as_slice(), &[1, 2, 3, 0, 0]);

        array.resize(2).unwrap();
        assert_eq!(array.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_into_vec_returns_contents() {
        let mut array = MemoryArray::<u32>::new(3).unwrap();
        array.set(1, 7).unwrap();
        array.resize(4).unwrap();
        assert_eq!(array.into_vec(), vec![0, 7, 0, 0]);
    }

    #[test]
    fn test_out_of_range() {
        let mut array = MemoryArray::<u8>::new(4).unwrap();
        assert!(matches!(
            array.set(4, 1),
            Err(HugeArrayError::IndexOutOfRange { index: 4, len: 4 })
        ));
    }
}
