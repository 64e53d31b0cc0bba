use bytes::{Buf, BufMut};

use crate::error::{DataError, Result};

/// Array file header: four little-endian `i32` dimensions = 16 bytes.
pub const HEADER_SIZE: usize = 16;

/// The four dimensions of a scan data array.
///
/// In practice `(slow-axis points, fast-axis points, averages, channels)`,
/// but the codec only cares about the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape(pub [i32; 4]);

impl Shape {
    pub fn new(d0: i32, d1: i32, d2: i32, d3: i32) -> Self {
        Self([d0, d1, d2, d3])
    }

    pub fn dims(&self) -> [i32; 4] {
        self.0
    }

    /// Product of the dimensions.
    ///
    /// Fails on a negative dimension or when the product overflows `usize`.
    pub fn element_count(&self) -> Result<usize> {
        self.0.iter().try_fold(1usize, |acc, &d| {
            let d = usize::try_from(d).map_err(|_| DataError::InvalidShape(self.0))?;
            acc.checked_mul(d).ok_or(DataError::InvalidShape(self.0))
        })
    }

    /// Row-major strides in elements.
    ///
    /// Fails like [`Self::element_count`] when a dimension is negative or a
    /// stride overflows `usize`.
    pub fn strides(&self) -> Result<[usize; 4]> {
        let invalid = || DataError::InvalidShape(self.0);
        let [_, d1, d2, d3] = self.0;
        let d1 = usize::try_from(d1).map_err(|_| invalid())?;
        let d2 = usize::try_from(d2).map_err(|_| invalid())?;
        let d3 = usize::try_from(d3).map_err(|_| invalid())?;

        let s2 = d3;
        let s1 = d2.checked_mul(s2).ok_or_else(invalid)?;
        let s0 = d1.checked_mul(s1).ok_or_else(invalid)?;
        Ok([s0, s1, s2, 1])
    }

    pub(crate) fn put(&self, dst: &mut impl BufMut) {
        for d in self.0 {
            dst.put_i32_le(d);
        }
    }

    pub(crate) fn get(src: &mut impl Buf) -> Result<Self> {
        if src.remaining() < HEADER_SIZE {
            return Err(DataError::TruncatedHeader {
                len: src.remaining(),
                need: HEADER_SIZE,
            });
        }
        Ok(Self([
            src.get_i32_le(),
            src.get_i32_le(),
            src.get_i32_le(),
            src.get_i32_le(),
        ]))
    }
}

impl From<[i32; 4]> for Shape {
    fn from(dims: [i32; 4]) -> Self {
        Self(dims)
    }
}

impl From<(i32, i32, i32, i32)> for Shape {
    fn from((d0, d1, d2, d3): (i32, i32, i32, i32)) -> Self {
        Self([d0, d1, d2, d3])
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [d0, d1, d2, d3] = self.0;
        write!(f, "{d0}x{d1}x{d2}x{d3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_count_is_product() {
        assert_eq!(Shape::new(2, 3, 4, 5).element_count().unwrap(), 120);
        assert_eq!(Shape::new(0, 3, 4, 5).element_count().unwrap(), 0);
    }

    #[test]
    fn negative_dimension_is_invalid() {
        let err = Shape::new(2, -1, 1, 1).element_count().unwrap_err();
        assert!(matches!(err, DataError::InvalidShape([2, -1, 1, 1])));
    }

    #[test]
    fn strides_are_row_major() {
        assert_eq!(Shape::new(2, 3, 4, 5).strides().unwrap(), [60, 20, 5, 1]);
    }

    #[test]
    fn oversized_strides_are_invalid() {
        let shape = Shape::new(1, i32::MAX, i32::MAX, i32::MAX);
        assert!(matches!(shape.strides(), Err(DataError::InvalidShape(_))));
        assert!(matches!(
            Shape::new(1, 2, -3, 4).strides(),
            Err(DataError::InvalidShape([1, 2, -3, 4]))
        ));
    }

    #[test]
    fn header_is_little_endian() {
        let mut buf = Vec::new();
        Shape::new(1, 256, -1, 7).put(&mut buf);
        assert_eq!(
            buf,
            [1, 0, 0, 0, 0, 1, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 7, 0, 0, 0]
        );
    }

    #[test]
    fn short_header_is_rejected() {
        let mut src: &[u8] = &[0u8; 15];
        let err = Shape::get(&mut src).unwrap_err();
        assert!(matches!(err, DataError::TruncatedHeader { len: 15, need: 16 }));
    }

    #[test]
    fn displays_as_dimensions() {
        assert_eq!(Shape::new(64, 64, 1, 8).to_string(), "64x64x1x8");
    }
}
