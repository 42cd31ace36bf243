//! Element Module
//!
//! Fixed-size element types that can live in a mapped array.
//!
//! ## Encoding
//! Every element occupies exactly `SIZE` bytes, little-endian. Element `i` of
//! a segment sits at byte offset `(i mod segment_capacity) * SIZE`.

/// A fixed-size value storable in a huge array
///
/// `Default::default()` is the zero value written into newly grown indices.
pub trait Element: Copy + Default {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Encode into `buf` (exactly `SIZE` bytes)
    fn write_to(&self, buf: &mut [u8]);

    /// Decode from `buf` (exactly `SIZE` bytes)
    fn read_from(buf: &[u8]) -> Self;
}

macro_rules! impl_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn write_to(&self, buf: &mut [u8]) {
                    buf[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn read_from(buf: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&buf[..Self::SIZE]);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_element!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

// Pairs cover coordinates (lat, lon) and edge records (from, to).
impl<A: Element, B: Element> Element for (A, B) {
    const SIZE: usize = A::SIZE + B::SIZE;

    #[inline]
    fn write_to(&self, buf: &mut [u8]) {
        self.0.write_to(&mut buf[..A::SIZE]);
        self.1.write_to(&mut buf[A::SIZE..Self::SIZE]);
    }

    #[inline]
    fn read_from(buf: &[u8]) -> Self {
        (A::read_from(&buf[..A::SIZE]), B::read_from(&buf[A::SIZE..Self::SIZE]))
    }
}
