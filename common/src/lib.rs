//! Fixed-width little-endian readers shared by the container parsers.
use std::array::from_fn;

use nom::{IResult as _IResult, Parser, bytes::complete::take, combinator::map, error::Error};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

/// Reads exactly `N` bytes into an array.
pub fn fixed_bytes<const N: usize>(i: &[u8]) -> IResult<'_, [u8; N]> {
    map(take(N), |res: &[u8]| from_fn(|idx| res[idx])).parse(i)
}

/// Reads a byte field whose width is only known at runtime, such as a path column.
pub fn byte_field<'a>(
    length: usize,
) -> impl Parser<&'a [u8], Output = Vec<u8>, Error = Error<&'a [u8]>> {
    map(take(length), |res: &[u8]| res.to_vec())
}

/// Decodes a fixed-length ASCII field.
///
/// Stops at the first null and drops trailing space padding. Bytes outside of printable ASCII
/// are replaced so the result is always valid UTF-8.
pub fn fixed_str(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&c| c == 0).unwrap_or(bytes.len());

    bytes[..end]
        .iter()
        .map(|&c| if c.is_ascii() && !c.is_ascii_control() { c as char } else { '?' })
        .collect::<String>()
        .trim_end_matches(' ')
        .to_string()
}

#[cfg(test)]
mod test {
    use nom::number::complete::le_u32;

    use super::*;

    #[test]
    fn fixed_bytes_reads_exact_width() {
        let (rest, guid) = fixed_bytes::<4>(&[1, 2, 3, 4, 5]).unwrap();

        assert_eq!(guid, [1, 2, 3, 4]);
        assert_eq!(rest, [5]);
    }

    #[test]
    fn fixed_bytes_short_input() {
        assert!(fixed_bytes::<16>(&[0u8; 15]).is_err());
    }

    #[test]
    fn byte_field_then_integer() {
        let bytes = [b'a', b'b', 0, 0, 0x2a, 0, 0, 0];
        let (rest, (field, value)) = (byte_field(4), le_u32).parse(&bytes[..]).unwrap();

        assert!(rest.is_empty());
        assert_eq!(field, b"ab\0\0");
        assert_eq!(value, 42);
    }

    #[test]
    fn fixed_str_stops_at_null() {
        assert_eq!(fixed_str(b"a.txt\0junk"), "a.txt");
        assert_eq!(fixed_str(b"SP  "), "SP");
        assert_eq!(fixed_str(b""), "");
    }
}
