//! Binary polar files.
//!
//! The format is a little-endian `i32` count of control points followed by
//! one 24-byte record per control point: six `f32` values in the order
//! anchor speed, anchor sink, previous handle speed, previous handle sink,
//! next handle speed, next handle sink. There is no header, footer or
//! checksum, and any bytes after the last record are ignored.
//!
//! Values are widened to `f64` on decoding without loss. Encoding narrows
//! them back to `f32`, which is exact for any polar that was decoded.
use alloc::vec::Vec;

use num_traits::cast;

use crate::{ControlPoint, Point, Polar, PolarError};

/// Size of the control point count in bytes
pub const COUNT_LEN: usize = 4;

/// Size of one control point record in bytes
pub const RECORD_LEN: usize = 24;

#[inline]
fn count_from(bytes: [u8; COUNT_LEN]) -> Result<usize, PolarError> {
    let count = i32::from_le_bytes(bytes);
    cast::<i32, usize>(count).ok_or(PolarError::Invalid("negative control point count"))
}

#[inline]
fn control_point(record: &[u8]) -> ControlPoint {
    let mut v = [0.0_f64; 6];
    for (x, b) in v.iter_mut().zip(record.chunks_exact(4)) {
        *x = f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]]));
    }

    ControlPoint::new(
        Point::new(v[0], v[1]),
        Point::new(v[2], v[3]),
        Point::new(v[4], v[5]),
    )
}

#[inline]
fn record(cp: &ControlPoint) -> [u8; RECORD_LEN] {
    let values = [
        cp.anchor.speed,
        cp.anchor.sink,
        cp.previous_handle.speed,
        cp.previous_handle.sink,
        cp.next_handle.speed,
        cp.next_handle.sink,
    ];

    let mut out = [0_u8; RECORD_LEN];
    for (chunk, v) in out.chunks_exact_mut(4).zip(values) {
        chunk.copy_from_slice(&(v as f32).to_le_bytes());
    }
    out
}

/// Decode a polar from an in-memory buffer.
///
/// # Errors
/// * If the buffer is shorter than its declared number of records
/// * If the count is negative or fewer than two control points are declared
pub fn decode(bytes: &[u8]) -> Result<Polar, PolarError> {
    if bytes.len() < COUNT_LEN {
        return Err(PolarError::Truncated);
    }
    let count = count_from([bytes[0], bytes[1], bytes[2], bytes[3]])?;
    tracing::debug!(count, len = bytes.len(), "decoding polar");

    let body = &bytes[COUNT_LEN..];
    let needed = count
        .checked_mul(RECORD_LEN)
        .ok_or(PolarError::Invalid("control point count is too large"))?;
    if body.len() < needed {
        return Err(PolarError::Truncated);
    }

    let points = body[..needed]
        .chunks_exact(RECORD_LEN)
        .map(control_point)
        .collect();
    Polar::new(points)
}

/// Encode a polar, narrowing every value to `f32`.
///
/// # Errors
/// * If the number of control points does not fit in an `i32`
pub fn encode(polar: &Polar) -> Result<Vec<u8>, PolarError> {
    let count = cast::<usize, i32>(polar.len())
        .ok_or(PolarError::Invalid("too many control points to encode"))?;

    let mut out = Vec::with_capacity(COUNT_LEN + RECORD_LEN * polar.len());
    out.extend_from_slice(&count.to_le_bytes());
    for cp in polar.control_points() {
        out.extend_from_slice(&record(cp));
    }
    Ok(out)
}

#[cfg(feature = "std")]
pub use self::stream::{load_polar, read_polar, write_polar};

#[cfg(feature = "std")]
mod stream {
    use std::fs::File;
    use std::io::{BufReader, Read, Write};
    use std::path::Path;

    use super::*;

    /// Read a polar from a byte source.
    ///
    /// A source that ends early surfaces as an [`std::io::ErrorKind::UnexpectedEof`]
    /// error. Nothing is read past the last declared record.
    ///
    /// # Errors
    /// * If the source fails or ends before the declared number of records
    /// * If the count is negative or fewer than two control points are declared
    pub fn read_polar<R: Read>(mut reader: R) -> Result<Polar, PolarError> {
        let mut head = [0_u8; COUNT_LEN];
        reader.read_exact(&mut head)?;
        let count = count_from(head)?;
        tracing::debug!(count, "reading polar");

        // The count is untrusted; let the vec grow past a modest size
        let mut points = Vec::with_capacity(count.min(64));
        let mut buf = [0_u8; RECORD_LEN];
        for _ in 0..count {
            reader.read_exact(&mut buf)?;
            points.push(control_point(&buf));
        }

        Polar::new(points)
    }

    /// Load a polar from a file.
    pub fn load_polar<P: AsRef<Path>>(path: P) -> Result<Polar, PolarError> {
        let file = File::open(path.as_ref())?;
        read_polar(BufReader::new(file))
    }

    /// Write a polar in the binary format.
    pub fn write_polar<W: Write>(polar: &Polar, mut writer: W) -> Result<(), PolarError> {
        writer.write_all(&encode(polar)?)?;
        writer.flush()?;
        Ok(())
    }
}
