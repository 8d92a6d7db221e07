//! Decoder for Google's encoded polyline format at precision 5.
//!
//! See: <https://developers.google.com/maps/documentation/utilities/polylinealgorithm>

use cargoroute_core::Coordinate;
use thiserror::Error;

const PRECISION: f64 = 1.0e5;
const CHUNK_BITS: u32 = 5;
const CONTINUATION: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
const OFFSET: u8 = 63;

/// Malformed polyline text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// A byte outside the encoding alphabet.
    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte {
        /// Offending byte.
        byte: u8,
        /// Position in the input.
        offset: usize,
    },
    /// The input ended inside a value, or a value or running sum ran past
    /// 64 bits.
    #[error("polyline truncated or overlong at offset {offset}")]
    Truncated {
        /// Position where decoding stopped.
        offset: usize,
    },
}

/// Decode an encoded polyline into coordinates.
///
/// # Errors
///
/// Returns [`PolylineError`] when the text is not a complete polyline.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let mut bytes = encoded.bytes().enumerate().peekable();
    let mut points = Vec::new();
    let (mut latitude, mut longitude) = (0_i64, 0_i64);

    while let Some(&(offset, _)) = bytes.peek() {
        latitude = accumulate(latitude, next_delta(&mut bytes, encoded.len())?, offset)?;
        longitude = accumulate(longitude, next_delta(&mut bytes, encoded.len())?, offset)?;
        points.push(Coordinate::new(
            latitude as f64 / PRECISION,
            longitude as f64 / PRECISION,
        ));
    }
    Ok(points)
}

fn accumulate(total: i64, delta: i64, offset: usize) -> Result<i64, PolylineError> {
    total
        .checked_add(delta)
        .ok_or(PolylineError::Truncated { offset })
}

fn next_delta(
    bytes: &mut impl Iterator<Item = (usize, u8)>,
    len: usize,
) -> Result<i64, PolylineError> {
    let mut result = 0_i64;
    let mut shift = 0_u32;
    loop {
        let (offset, byte) = bytes.next().ok_or(PolylineError::Truncated { offset: len })?;
        if !(OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidByte { byte, offset });
        }
        if shift >= i64::BITS - CHUNK_BITS {
            return Err(PolylineError::Truncated { offset });
        }
        let chunk = i64::from(byte - OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        if chunk < CONTINUATION {
            break;
        }
    }
    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
