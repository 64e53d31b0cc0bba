use std::path::Path;

use bytes::{Buf, BufMut};
use tracing::debug;

use crate::error::{DataError, Result};

const COUNT_SIZE: usize = 4;

/// Append a channel list: `i32` count followed by each index, little-endian.
pub fn encode_channel_list(channels: &[i32], dst: &mut impl BufMut) -> Result<()> {
    let count =
        i32::try_from(channels.len()).map_err(|_| DataError::TooManyChannels(channels.len()))?;
    dst.put_i32_le(count);
    for &ch in channels {
        dst.put_i32_le(ch);
    }
    Ok(())
}

/// Decode a channel-list image, checking the count against the payload.
pub fn decode_channel_list(mut src: &[u8]) -> Result<Vec<i32>> {
    if src.len() < COUNT_SIZE {
        return Err(DataError::TruncatedHeader {
            len: src.len(),
            need: COUNT_SIZE,
        });
    }
    let count = src.get_i32_le();
    let count_usize = usize::try_from(count).map_err(|_| DataError::InvalidCount(count))?;

    let payload_len = src.remaining();
    if payload_len % 4 != 0 {
        return Err(DataError::TruncatedPayload { len: payload_len });
    }
    if payload_len != count_usize * 4 {
        return Err(DataError::PayloadSizeMismatch {
            expected: count_usize * 4,
            actual: payload_len,
        });
    }

    let mut channels = Vec::with_capacity(count_usize);
    while src.has_remaining() {
        channels.push(src.get_i32_le());
    }
    Ok(channels)
}

/// Write a channel-list file.
pub fn write_channel_list(path: impl AsRef<Path>, channels: &[i32]) -> Result<()> {
    let path = path.as_ref();
    let mut buf = Vec::with_capacity(COUNT_SIZE + channels.len() * 4);
    encode_channel_list(channels, &mut buf)?;
    std::fs::write(path, &buf).map_err(|e| DataError::io(path, e))?;
    debug!(?path, channels = channels.len(), "wrote channel list");
    Ok(())
}

/// Read a channel-list file.
pub fn read_channel_list(path: impl AsRef<Path>) -> Result<Vec<i32>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DataError::io(path, e))?;
    decode_channel_list(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_leads_the_list() {
        let mut buf = Vec::new();
        encode_channel_list(&[0, 3, 7], &mut buf).unwrap();

        assert_eq!(buf.len(), 16);
        assert_eq!(&buf[..4], &3i32.to_le_bytes());
        assert_eq!(decode_channel_list(&buf).unwrap(), vec![0, 3, 7]);
    }

    #[test]
    fn empty_list_is_just_a_zero_count() {
        let mut buf = Vec::new();
        encode_channel_list(&[], &mut buf).unwrap();
        assert_eq!(buf, 0i32.to_le_bytes());
        assert!(decode_channel_list(&buf).unwrap().is_empty());
    }

    #[test]
    fn order_and_duplicates_are_kept() {
        let channels = [5, 1, 5, -1];
        let mut buf = Vec::new();
        encode_channel_list(&channels, &mut buf).unwrap();
        assert_eq!(decode_channel_list(&buf).unwrap(), channels);
    }

    #[test]
    fn count_disagreeing_with_payload() {
        let mut buf = Vec::new();
        buf.put_i32_le(3);
        buf.put_i32_le(1);

        let err = decode_channel_list(&buf).unwrap_err();
        assert!(matches!(
            err,
            DataError::PayloadSizeMismatch {
                expected: 12,
                actual: 4
            }
        ));
    }

    #[test]
    fn negative_count() {
        let mut buf = Vec::new();
        buf.put_i32_le(-1);
        let err = decode_channel_list(&buf).unwrap_err();
        assert!(matches!(err, DataError::InvalidCount(-1)));
    }

    #[test]
    fn missing_count() {
        let err = decode_channel_list(&[1, 0]).unwrap_err();
        assert!(matches!(err, DataError::TruncatedHeader { len: 2, need: 4 }));
    }
}
