// Framing of a device transfer: a 12 byte header followed by the payload

use std::io::Read;

use crate::bitmap::BITMAP_HEADER_SIZE;
use crate::capture::Capture;
use crate::error::Result;
use crate::field::read_u32le;

pub const TRANSFER_HEADER_SIZE: usize = 12;

const FILE_SIZE: usize = 0;
const FILE_TYPE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Vector,
    Bitmap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferHeader {
    pub kind: TransferKind,
    /// Number of payload bytes that follow the header.
    pub length: usize,
}

impl TransferHeader {
    pub fn parse(header: &[u8; TRANSFER_HEADER_SIZE]) -> Self {
        let mut length = read_u32le(header, FILE_SIZE, 3) as usize;
        let kind = if header[FILE_TYPE] == 1 {
            // The bitmap size excludes its own header
            length += BITMAP_HEADER_SIZE;
            TransferKind::Bitmap
        } else {
            TransferKind::Vector
        };
        TransferHeader { kind, length }
    }
}

/// Read one complete transfer from `reader` and decode its payload.
pub fn read_transfer<R: Read>(reader: &mut R) -> Result<Capture> {
    let mut header_buf = [0u8; TRANSFER_HEADER_SIZE];
    reader.read_exact(&mut header_buf)?;
    let header = TransferHeader::parse(&header_buf);
    log::debug!("transfer: {:?} payload of {} bytes", header.kind, header.length);

    let mut data = Vec::new();
    data.try_reserve_exact(header.length)?;
    data.resize(header.length, 0);
    reader.read_exact(&mut data)?;

    Capture::decode_with_length(&data, header.length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::tests::create_bitmap;
    use crate::error::{ErrorKind, PdsError};
    use crate::waveform::tests::{create_waveform, RecordFields};

    fn frame(kind: u8, declared: usize, payload: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; TRANSFER_HEADER_SIZE];
        buf[..3].copy_from_slice(&(declared as u32).to_le_bytes()[..3]);
        buf[FILE_TYPE] = kind;
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn test_header_parse() {
        let mut raw = [0u8; TRANSFER_HEADER_SIZE];
        raw[..4].copy_from_slice(&[0x10, 0x20, 0x03, 0xff]);
        let header = TransferHeader::parse(&raw);
        assert_eq!(header.kind, TransferKind::Vector);
        assert_eq!(header.length, 0x032010);

        raw[FILE_TYPE] = 1;
        let header = TransferHeader::parse(&raw);
        assert_eq!(header.kind, TransferKind::Bitmap);
        assert_eq!(header.length, 0x032010 + 54);
    }

    #[test]
    fn test_read_waveform_transfer() {
        let payload = create_waveform(b'V', &[RecordFields::default()]);
        let stream = frame(0, payload.len(), &payload);
        let capture = read_transfer(&mut stream.as_slice()).unwrap();
        assert_eq!(capture.channels().len(), 1);
        assert_eq!(capture.length, payload.len());
    }

    #[test]
    fn test_read_bitmap_transfer() {
        let payload = create_bitmap();
        let stream = frame(1, payload.len() - BITMAP_HEADER_SIZE, &payload);
        let capture = read_transfer(&mut stream.as_slice()).unwrap();
        assert!(capture.is_bitmap());
    }

    #[test]
    fn test_short_stream() {
        let payload = create_waveform(b'V', &[RecordFields::default()]);
        let stream = frame(0, payload.len() + 5, &payload);
        let err = read_transfer(&mut stream.as_slice()).unwrap_err();
        assert!(matches!(err, PdsError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);

        let err = read_transfer(&mut &[0u8; 4][..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
