//! Encoded polyline codec
//!
//! Implements the signed-delta polyline format used by the directions
//! provider: every coordinate is the zig-zag encoded difference to the
//! previous one, scaled by 1e5 and packed into 5-bit groups offset by 63
//! so that each group is a printable ASCII character.

use thiserror::Error;

use crate::value_objects::GeoPoint;

const PRECISION: f64 = 1e5;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: i64 = 0x20;
const GROUP_MASK: i64 = 0x1f;
/// Seven 5-bit groups cover a 32-bit value; an eighth group cannot be valid.
const MAX_SHIFT: u32 = 30;

/// Errors produced while decoding an encoded polyline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The input ended inside a value or between the two axes of a point
    #[error("Truncated polyline at byte {position}")]
    Truncated { position: usize },

    /// A byte outside the printable range `'?'..='~'`
    #[error("Invalid polyline character {character:?} at byte {position}")]
    InvalidCharacter { character: char, position: usize },

    /// A continuation chain too long to fit a 32-bit value
    #[error("Polyline value overflow at byte {position}")]
    Overflow { position: usize },
}

/// Decode an encoded polyline into points, in encoding order
///
/// The empty string decodes to an empty sequence.
///
/// # Errors
///
/// Returns a [`PolylineError`] for truncated input, characters outside the
/// polyline alphabet, or non-terminating continuation chains.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut index = 0;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;

    while index < bytes.len() {
        latitude += next_delta(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(PolylineError::Truncated { position: index });
        }
        longitude += next_delta(bytes, &mut index)?;

        #[allow(clippy::cast_precision_loss)] // accumulators stay far below 2^52
        points.push(GeoPoint::new_unchecked(
            latitude as f64 / PRECISION,
            longitude as f64 / PRECISION,
        ));
    }

    Ok(points)
}

/// Read one zig-zag encoded value starting at `index`, advancing past it
fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let position = *index;
        let Some(&byte) = bytes.get(position) else {
            return Err(PolylineError::Truncated { position });
        };
        if !(b'?'..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                character: char::from(byte),
                position,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position });
        }

        let group = i64::from(byte - CHAR_OFFSET);
        result |= (group & GROUP_MASK) << shift;
        shift += 5;
        *index += 1;

        if group < CONTINUATION_BIT {
            break;
        }
    }

    Ok(if result & 1 == 0 {
        result >> 1
    } else {
        !(result >> 1)
    })
}

/// Encode points into a polyline string
///
/// Coordinates are rounded to five decimal places, so `decode(encode(p))`
/// reproduces `p` within 1e-5.
#[must_use]
pub fn encode(points: &[GeoPoint]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut previous = (0_i64, 0_i64);

    for point in points {
        let current = (scale(point.latitude()), scale(point.longitude()));
        push_value(&mut encoded, current.0 - previous.0);
        push_value(&mut encoded, current.1 - previous.1);
        previous = current;
    }

    encoded
}

#[allow(clippy::cast_possible_truncation)] // valid coordinates scale to well under i64::MAX
fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn push_value(out: &mut String, delta: i64) {
    let mut value = (delta << 1) ^ (delta >> 63);
    while value >= CONTINUATION_BIT {
        out.push(char::from(((CONTINUATION_BIT | (value & GROUP_MASK)) as u8) + CHAR_OFFSET));
        value >>= 5;
    }
    out.push(char::from((value as u8) + CHAR_OFFSET));
}
