//! Format-specific readers for recorded per-channel bit depth.
//!
//! - **PNG**: the `sBIT` ancillary chunk (significant bits, one byte per
//!   stored channel). Only valid before the first `IDAT`.
//! - **TIFF / EXIF containers**: `BitsPerSample` in the primary IFD.
//!
//! Every reader rewinds the stream first and leaves it at an arbitrary
//! position afterwards.

use exif::{In, Reader, Tag, Value};
use std::io::{BufRead, ErrorKind, Read, Seek, SeekFrom};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest legal `sBIT` payload (truecolor with alpha).
const SBIT_MAX_LEN: u32 = 4;

/// Read the `sBIT` chunk of a PNG stream.
///
/// Returns `Ok(None)` when the stream is not a PNG, has no `sBIT` before
/// image data, or ends early. Only genuine I/O failures are errors.
pub fn png_significant_bits<R: Read + Seek>(reader: &mut R) -> std::io::Result<Option<Vec<u16>>> {
    reader.seek(SeekFrom::Start(0))?;

    let mut signature = [0u8; 8];
    if !read_or_eof(reader, &mut signature)? || signature != PNG_SIGNATURE {
        return Ok(None);
    }

    loop {
        // length (4, big-endian) + chunk type (4)
        let mut header = [0u8; 8];
        if !read_or_eof(reader, &mut header)? {
            return Ok(None);
        }
        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let kind = &header[4..8];

        match kind {
            b"sBIT" => {
                if length == 0 || length > SBIT_MAX_LEN {
                    tracing::debug!("Ignoring malformed sBIT chunk of {} bytes", length);
                    return Ok(None);
                }
                let mut data = vec![0u8; length as usize];
                if !read_or_eof(reader, &mut data)? {
                    return Ok(None);
                }
                return Ok(Some(data.into_iter().map(u16::from).collect()));
            }
            b"IDAT" | b"IEND" => return Ok(None),
            // Skip payload + CRC
            _ => {
                reader.seek(SeekFrom::Current(i64::from(length) + 4))?;
            }
        }
    }
}

/// Read `BitsPerSample` from the primary IFD of any container the EXIF
/// reader understands.
///
/// Lenient: a missing or unreadable EXIF block yields `None`.
pub fn exif_bits_per_sample<R: BufRead + Seek>(reader: &mut R) -> Option<Vec<u16>> {
    reader.seek(SeekFrom::Start(0)).ok()?;
    let exif = Reader::new().read_from_container(reader).ok()?;
    let field = exif.get_field(Tag::BitsPerSample, In::PRIMARY)?;
    match &field.value {
        Value::Short(v) => Some(v.clone()),
        Value::Long(v) => Some(v.iter().map(|&x| x.min(u32::from(u16::MAX)) as u16).collect()),
        _ => None,
    }
}

/// `read_exact` that reports a clean end of stream as `false`.
fn read_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<bool> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    /// Assemble a PNG-shaped byte stream from `(type, payload)` chunks.
    /// CRCs are zeroed; the reader never checks them.
    pub(crate) fn png_stream(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let mut data = PNG_SIGNATURE.to_vec();
        for (kind, payload) in chunks {
            data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            data.extend_from_slice(*kind);
            data.extend_from_slice(payload);
            data.extend_from_slice(&[0, 0, 0, 0]);
        }
        data
    }

    fn ihdr() -> [u8; 13] {
        // 1x1, 8-bit, truecolor with alpha
        [0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0]
    }

    #[test]
    fn test_sbit_found_before_idat() {
        let bytes = png_stream(&[
            (b"IHDR", &ihdr()),
            (b"sBIT", &[5, 6, 5, 8]),
            (b"IDAT", &[0, 0]),
            (b"IEND", &[]),
        ]);
        let bits = png_significant_bits(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(bits, Some(vec![5, 6, 5, 8]));
    }

    #[test]
    fn test_sbit_after_idat_ignored() {
        let bytes = png_stream(&[
            (b"IHDR", &ihdr()),
            (b"IDAT", &[0, 0]),
            (b"sBIT", &[8, 8, 8, 8]),
            (b"IEND", &[]),
        ]);
        assert_eq!(png_significant_bits(&mut Cursor::new(bytes)).unwrap(), None);
    }

    #[test]
    fn test_sbit_absent() {
        let bytes = png_stream(&[(b"IHDR", &ihdr()), (b"IEND", &[])]);
        assert_eq!(png_significant_bits(&mut Cursor::new(bytes)).unwrap(), None);
    }

    #[test]
    fn test_sbit_oversized_chunk_ignored() {
        let bytes = png_stream(&[(b"IHDR", &ihdr()), (b"sBIT", &[8, 8, 8, 8, 8])]);
        assert_eq!(png_significant_bits(&mut Cursor::new(bytes)).unwrap(), None);
    }

    #[test]
    fn test_truncated_stream_is_not_an_error() {
        let mut bytes = png_stream(&[(b"IHDR", &ihdr()), (b"sBIT", &[8, 8, 8])]);
        bytes.truncate(bytes.len() - 6);
        assert_eq!(png_significant_bits(&mut Cursor::new(bytes)).unwrap(), None);
    }

    #[test]
    fn test_non_png_stream() {
        let bytes = b"GIF89a\x01\x00\x01\x00".to_vec();
        assert_eq!(png_significant_bits(&mut Cursor::new(bytes)).unwrap(), None);
    }

    #[test]
    fn test_exif_missing_is_none() {
        let bytes = png_stream(&[(b"IHDR", &ihdr()), (b"IEND", &[])]);
        assert_eq!(exif_bits_per_sample(&mut Cursor::new(bytes)), None);
        assert_eq!(exif_bits_per_sample(&mut Cursor::new(b"not an image".to_vec())), None);
    }

    /// Little-endian TIFF with a single IFD0 entry: BitsPerSample, three
    /// values stored out of line with the given field type.
    fn tiff_with_bits_per_sample(field_type: u16, values: &[u32]) -> Vec<u8> {
        let mut data = b"II*\0".to_vec();
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&0x0102u16.to_le_bytes());
        data.extend_from_slice(&field_type.to_le_bytes());
        data.extend_from_slice(&(values.len() as u32).to_le_bytes());
        // Values start right after the entry and the next-IFD pointer
        data.extend_from_slice(&26u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        for &v in values {
            match field_type {
                3 => data.extend_from_slice(&(v as u16).to_le_bytes()),
                _ => data.extend_from_slice(&v.to_le_bytes()),
            }
        }
        data
    }

    #[test]
    fn test_exif_bits_per_sample_short() {
        let bytes = tiff_with_bits_per_sample(3, &[8, 8, 8]);
        assert_eq!(
            exif_bits_per_sample(&mut Cursor::new(bytes)),
            Some(vec![8, 8, 8])
        );
    }

    #[test]
    fn test_exif_bits_per_sample_long() {
        let bytes = tiff_with_bits_per_sample(4, &[16, 16, 16]);
        assert_eq!(
            exif_bits_per_sample(&mut Cursor::new(bytes)),
            Some(vec![16, 16, 16])
        );
    }
}
