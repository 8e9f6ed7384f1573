//! Conversion of DTED elevation samples to native integers.
//!
//! DTED stores each elevation as a 16-bit big-endian value whose most
//! significant bit is a sign flag and whose remaining 15 bits are the
//! magnitude. This is not two's complement: `0x8000` is "negative zero".

use std::io::Read;

/// Sign flag of a DTED sample.
const SIGN_BIT: u16 = 0x8000;

/// Magnitude bits of a DTED sample.
const MAGNITUDE_MASK: u16 = 0x7FFF;

/// Convert a raw big-endian sign-magnitude sample to a native `i16`.
///
/// # Examples
///
/// ```
/// use dted::sample::from_sign_magnitude;
///
/// assert_eq!(from_sign_magnitude([0x00, 0x0A]), 10);
/// assert_eq!(from_sign_magnitude([0x80, 0x0A]), -10);
/// assert_eq!(from_sign_magnitude([0x80, 0x00]), 0);
/// ```
pub fn from_sign_magnitude(raw: [u8; 2]) -> i16 {
    let value = u16::from_be_bytes(raw);
    let magnitude = (value & MAGNITUDE_MASK) as i16;

    if value & SIGN_BIT != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Read one sample from `reader` and convert it.
pub fn read_sample<R: Read>(reader: &mut R) -> std::io::Result<i16> {
    let mut raw = [0u8; 2];
    reader.read_exact(&mut raw)?;
    Ok(from_sign_magnitude(raw))
}
