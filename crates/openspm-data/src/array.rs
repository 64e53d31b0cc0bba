use std::path::Path;

use bytes::{Buf, BufMut, BytesMut};
use tracing::debug;

use crate::error::{DataError, Result};
use crate::shape::{Shape, HEADER_SIZE};

const VALUE_SIZE: usize = 4;

/// A 4-dimensional `f32` array stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanArray {
    shape: Shape,
    data: Vec<f32>,
}

impl ScanArray {
    /// Pair a shape with its flat data.
    ///
    /// Fails with `ShapeMismatch` when `data.len()` is not the product of the
    /// shape.
    pub fn new(shape: impl Into<Shape>, data: Vec<f32>) -> Result<Self> {
        let shape = shape.into();
        let expected = shape.element_count()?;
        if data.len() != expected {
            return Err(DataError::ShapeMismatch {
                shape: shape.dims(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// An all-zero array of the given shape.
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self> {
        let shape = shape.into();
        let len = shape.element_count()?;
        Ok(Self {
            shape,
            data: vec![0.0; len],
        })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat offset of `(i, j, k, l)`, or `None` when out of bounds.
    pub fn index(&self, i: usize, j: usize, k: usize, l: usize) -> Option<usize> {
        let dims = self.shape.dims();
        let idx = [i, j, k, l];
        if idx
            .iter()
            .zip(dims)
            .any(|(&n, d)| n >= d.max(0) as usize)
        {
            return None;
        }
        let strides = self.shape.strides().ok()?;
        Some(idx.iter().zip(strides).map(|(&n, s)| n * s).sum())
    }

    pub fn get(&self, i: usize, j: usize, k: usize, l: usize) -> Option<f32> {
        self.index(i, j, k, l).map(|n| self.data[n])
    }

    pub fn set(&mut self, i: usize, j: usize, k: usize, l: usize, value: f32) -> Option<()> {
        let n = self.index(i, j, k, l)?;
        self.data[n] = value;
        Some(())
    }

    pub fn into_parts(self) -> (Shape, Vec<f32>) {
        (self.shape, self.data)
    }
}

/// Append the array file layout (header + payload) to `dst`.
pub fn encode_array(array: &ScanArray, dst: &mut impl BufMut) {
    array.shape.put(dst);
    for &v in &array.data {
        dst.put_f32_le(v);
    }
}

/// Decode a complete array file image.
///
/// The payload must be exactly `4 * product(shape)` bytes: a ragged tail is
/// `TruncatedPayload`, any other disagreement is `PayloadSizeMismatch`.
pub fn decode_array(mut src: &[u8]) -> Result<ScanArray> {
    let shape = Shape::get(&mut src)?;

    let payload_len = src.remaining();
    if payload_len % VALUE_SIZE != 0 {
        return Err(DataError::TruncatedPayload { len: payload_len });
    }

    let count = shape.element_count()?;
    let expected = count
        .checked_mul(VALUE_SIZE)
        .ok_or(DataError::InvalidShape(shape.dims()))?;
    if payload_len != expected {
        return Err(DataError::PayloadSizeMismatch {
            expected,
            actual: payload_len,
        });
    }

    let mut data = Vec::with_capacity(count);
    while src.has_remaining() {
        data.push(src.get_f32_le());
    }
    Ok(ScanArray { shape, data })
}

/// Write `array` to `path`, replacing any existing file.
pub fn write_array(path: impl AsRef<Path>, array: &ScanArray) -> Result<()> {
    let path = path.as_ref();
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + array.len() * VALUE_SIZE);
    encode_array(array, &mut buf);
    std::fs::write(path, &buf).map_err(|e| DataError::io(path, e))?;
    debug!(?path, shape = %array.shape, bytes = buf.len(), "wrote array file");
    Ok(())
}

/// Read an array file from `path`.
pub fn read_array(path: impl AsRef<Path>) -> Result<ScanArray> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DataError::io(path, e))?;
    let array = decode_array(&bytes)?;
    debug!(?path, shape = %array.shape, "read array file");
    Ok(array)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(shape: Shape) -> ScanArray {
        let n = shape.element_count().unwrap();
        ScanArray::new(shape, (0..n).map(|i| i as f32 * 0.5).collect()).unwrap()
    }

    #[test]
    fn new_rejects_wrong_length() {
        let err = ScanArray::new((2, 2, 1, 1), vec![0.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            DataError::ShapeMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn indexing_is_row_major() {
        let array = ramp(Shape::new(2, 3, 1, 2));
        assert_eq!(array.index(0, 0, 0, 1), Some(1));
        assert_eq!(array.index(0, 1, 0, 0), Some(2));
        assert_eq!(array.index(1, 0, 0, 0), Some(6));
        assert_eq!(array.get(1, 2, 0, 1), Some(5.5));
        assert_eq!(array.get(2, 0, 0, 0), None);
    }

    #[test]
    fn set_updates_single_cell() {
        let mut array = ScanArray::zeros((1, 2, 2, 1)).unwrap();
        array.set(0, 1, 0, 0, 3.0).unwrap();
        assert_eq!(array.data(), &[0.0, 0.0, 3.0, 0.0]);
        assert!(array.set(0, 2, 0, 0, 1.0).is_none());
    }

    #[test]
    fn encoded_layout() {
        let array = ScanArray::new((1, 1, 1, 2), vec![1.0, -2.0]).unwrap();
        let mut buf = Vec::new();
        encode_array(&array, &mut buf);

        assert_eq!(buf.len(), HEADER_SIZE + 8);
        assert_eq!(&buf[..4], &1i32.to_le_bytes());
        assert_eq!(&buf[12..16], &2i32.to_le_bytes());
        assert_eq!(&buf[16..20], &1.0f32.to_le_bytes());
        assert_eq!(&buf[20..24], &(-2.0f32).to_le_bytes());
    }

    #[test]
    fn decode_is_bit_exact() {
        let values = vec![f32::NAN, f32::INFINITY, -0.0, f32::MIN_POSITIVE, 1.0e-40, 3.25];
        let array = ScanArray::new((1, 2, 3, 1), values.clone()).unwrap();
        let mut buf = Vec::new();
        encode_array(&array, &mut buf);

        let decoded = decode_array(&buf).unwrap();
        assert_eq!(decoded.shape(), Shape::new(1, 2, 3, 1));
        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(decoded.data()), bits(&values));
    }

    #[test]
    fn decode_short_header() {
        let err = decode_array(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, DataError::TruncatedHeader { len: 10, .. }));
    }

    #[test]
    fn decode_ragged_payload() {
        let mut buf = Vec::new();
        encode_array(&ramp(Shape::new(1, 1, 1, 2)), &mut buf);
        buf.pop();

        let err = decode_array(&buf).unwrap_err();
        assert!(matches!(err, DataError::TruncatedPayload { len: 7 }));
    }

    #[test]
    fn decode_payload_shorter_than_shape() {
        let mut buf = Vec::new();
        encode_array(&ramp(Shape::new(2, 2, 1, 1)), &mut buf);
        buf.truncate(HEADER_SIZE + 8);

        let err = decode_array(&buf).unwrap_err();
        assert!(matches!(
            err,
            DataError::PayloadSizeMismatch {
                expected: 16,
                actual: 8
            }
        ));
    }

    #[test]
    fn decode_payload_longer_than_shape() {
        let mut buf = Vec::new();
        encode_array(&ramp(Shape::new(1, 1, 1, 1)), &mut buf);
        buf.put_f32_le(9.0);

        let err = decode_array(&buf).unwrap_err();
        assert!(matches!(err, DataError::PayloadSizeMismatch { expected: 4, actual: 8 }));
    }

    #[test]
    fn decode_negative_shape() {
        let mut buf = Vec::new();
        Shape::new(1, -4, 1, 1).put(&mut buf);

        let err = decode_array(&buf).unwrap_err();
        assert!(matches!(err, DataError::InvalidShape(_)));
    }

    #[test]
    fn empty_shape_has_header_only() {
        let array = ScanArray::new((0, 16, 1, 8), Vec::new()).unwrap();
        let mut buf = Vec::new();
        encode_array(&array, &mut buf);
        assert_eq!(buf.len(), HEADER_SIZE);
        assert!(decode_array(&buf).unwrap().is_empty());
    }
}
