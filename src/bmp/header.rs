//! Fixed-offset BMP header fields and the row geometry derived from them.

use crate::error::BmpError;

/// Length of the BITMAPFILEHEADER that precedes the info header.
pub(crate) const FILE_HEADER_LEN: usize = 14;

/// Smallest info header (BITMAPINFOHEADER) carrying every field we read.
pub(crate) const MIN_INFO_HEADER_LEN: u32 = 40;

// Bytes needed to read everything up to and including the compression field.
const FIELDS_END: usize = 34;

const BI_RLE8: u32 = 1;
const BI_RLE4: u32 = 2;

/// The BMP header fields the normalizer depends on, read from fixed
/// little-endian offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Absolute offset of the first stored pixel row (offset 10).
    pub pixel_data_offset: u32,
    /// Size of the info header (offset 14).
    pub info_header_size: u32,
    /// Signed width (offset 18). Only the magnitude is used.
    pub width: i32,
    /// Signed height (offset 22). Positive = bottom-up, negative = top-down.
    pub height: i32,
    /// Colour planes (offset 26).
    pub planes: u16,
    /// Bits per pixel per plane (offset 28).
    pub bit_count: u16,
    /// Compression scheme (offset 30).
    pub compression: u32,
}

impl BitmapHeader {
    /// Validate the signature and info-header size, then read the fields.
    ///
    /// Compression is recorded but not judged here; see [`Self::is_rle`].
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        if data.get(0..2) != Some(b"BM".as_slice()) {
            return Err(BmpError::UnrecognizedFormat);
        }
        if data.len() < FIELDS_END {
            return Err(BmpError::UnexpectedEof);
        }

        let header = Self {
            pixel_data_offset: u32_le(data, 10),
            info_header_size: u32_le(data, 14),
            width: i32_le(data, 18),
            height: i32_le(data, 22),
            planes: u16_le(data, 26),
            bit_count: u16_le(data, 28),
            compression: u32_le(data, 30),
        };

        if header.info_header_size < MIN_INFO_HEADER_LEN {
            return Err(BmpError::InvalidHeader(alloc::format!(
                "info header size {} is below {MIN_INFO_HEADER_LEN}",
                header.info_header_size
            )));
        }
        if header.width == 0 {
            return Err(BmpError::InvalidHeader("BMP width is zero".into()));
        }
        if header.height == 0 {
            return Err(BmpError::InvalidHeader("BMP height is zero".into()));
        }

        Ok(header)
    }

    /// Total bits per pixel: planes times bit count.
    pub fn bits_per_pixel(&self) -> u32 {
        u32::from(self.planes) * u32::from(self.bit_count)
    }

    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    /// Whether the pixel data is run-length encoded (BI_RLE8 or BI_RLE4).
    pub fn is_rle(&self) -> bool {
        matches!(self.compression, BI_RLE8 | BI_RLE4)
    }

    /// Column count.
    pub fn columns(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Row count, regardless of orientation.
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Row geometry of the stored pixel data.
    pub fn geometry(&self) -> Result<Geometry, BmpError> {
        Geometry::new(
            self.columns(),
            self.rows(),
            self.bits_per_pixel(),
            self.pixel_data_offset as usize,
            self.is_bottom_up(),
        )
    }
}

/// Where the stored rows live and how long they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    width: u32,
    height: u32,
    bits_per_pixel: u32,
    bytewidth: usize,
    pitch: usize,
    offset: usize,
    bottom_up: bool,
}

impl Geometry {
    pub(crate) fn new(
        width: u32,
        height: u32,
        bits_per_pixel: u32,
        offset: usize,
        bottom_up: bool,
    ) -> Result<Self, BmpError> {
        let too_large = BmpError::DimensionsTooLarge { width, height };
        let bytewidth = (width as usize)
            .checked_mul(bits_per_pixel as usize)
            .map(|bits| bits / 8)
            .ok_or(too_large)?;
        let pitch = bytewidth
            .checked_add(3)
            .map(|b| b & !3)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        bytewidth
            .checked_mul(height as usize)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            bits_per_pixel,
            bytewidth,
            pitch,
            offset,
            bottom_up,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    /// Unpadded bytes per row.
    pub fn bytewidth(&self) -> usize {
        self.bytewidth
    }

    /// Stored bytes per row, including alignment padding.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn pixel_data_offset(&self) -> usize {
        self.offset
    }

    pub fn is_bottom_up(&self) -> bool {
        self.bottom_up
    }

    /// Size of the tightly packed, top-down output.
    pub fn output_len(&self) -> usize {
        // Checked in `new`.
        self.bytewidth * self.height as usize
    }

    /// Byte range within the file covering every stored row. The final row
    /// need not carry its padding.
    pub(crate) fn source_span(&self) -> Result<core::ops::Range<usize>, BmpError> {
        let too_large = || BmpError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        };
        let len = (self.height as usize)
            .saturating_sub(1)
            .checked_mul(self.pitch)
            .and_then(|rows| rows.checked_add(self.bytewidth))
            .ok_or_else(too_large)?;
        let end = self.offset.checked_add(len).ok_or_else(too_large)?;
        Ok(self.offset..end)
    }

    /// Offset, relative to the source span, of the stored row that becomes
    /// output row `y`.
    pub(crate) fn stored_row_start(&self, y: usize) -> usize {
        let stored = if self.bottom_up {
            self.height as usize - 1 - y
        } else {
            y
        };
        stored * self.pitch
    }
}

fn u16_le(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn u32_le(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn i32_le(data: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn header_bytes(width: i32, height: i32, planes: u16, bits: u16) -> Vec<u8> {
        let mut h = vec![0u8; 54];
        h[0..2].copy_from_slice(b"BM");
        h[10..14].copy_from_slice(&54u32.to_le_bytes());
        h[14..18].copy_from_slice(&40u32.to_le_bytes());
        h[18..22].copy_from_slice(&width.to_le_bytes());
        h[22..26].copy_from_slice(&height.to_le_bytes());
        h[26..28].copy_from_slice(&planes.to_le_bytes());
        h[28..30].copy_from_slice(&bits.to_le_bytes());
        h
    }

    #[test]
    fn reads_fields_little_endian() {
        let h = BitmapHeader::parse(&header_bytes(300, -7, 1, 24)).unwrap();
        assert_eq!(h.pixel_data_offset, 54);
        assert_eq!(h.columns(), 300);
        assert_eq!(h.rows(), 7);
        assert!(!h.is_bottom_up());
        assert_eq!(h.bits_per_pixel(), 24);
    }

    #[test]
    fn bits_is_planes_times_bit_count() {
        let h = BitmapHeader::parse(&header_bytes(1, 1, 2, 8)).unwrap();
        assert_eq!(h.bits_per_pixel(), 16);
    }

    #[test]
    fn rejects_bad_signature() {
        let mut bytes = header_bytes(1, 1, 1, 24);
        bytes[1] = b'A';
        assert!(matches!(
            BitmapHeader::parse(&bytes),
            Err(BmpError::UnrecognizedFormat)
        ));
        assert!(matches!(
            BitmapHeader::parse(b"B"),
            Err(BmpError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn rejects_small_info_header() {
        let mut bytes = header_bytes(1, 1, 1, 24);
        bytes[14..18].copy_from_slice(&12u32.to_le_bytes());
        assert!(matches!(
            BitmapHeader::parse(&bytes),
            Err(BmpError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_truncated_header() {
        let bytes = header_bytes(1, 1, 1, 24);
        assert!(matches!(
            BitmapHeader::parse(&bytes[..20]),
            Err(BmpError::UnexpectedEof)
        ));
    }

    #[test]
    fn flags_rle_without_rejecting() {
        let mut bytes = header_bytes(4, 4, 1, 8);
        assert!(!BitmapHeader::parse(&bytes).unwrap().is_rle());
        bytes[30..34].copy_from_slice(&1u32.to_le_bytes());
        let h = BitmapHeader::parse(&bytes).unwrap();
        assert_eq!(h.compression, 1);
        assert!(h.is_rle());
        bytes[30..34].copy_from_slice(&3u32.to_le_bytes());
        assert!(!BitmapHeader::parse(&bytes).unwrap().is_rle());
    }

    #[test]
    fn pitch_rounds_to_four_bytes() {
        let g = Geometry::new(5, 2, 24, 54, true).unwrap();
        assert_eq!(g.bytewidth(), 15);
        assert_eq!(g.pitch(), 16);
        assert_eq!(g.output_len(), 30);
        assert_eq!(g.source_span().unwrap(), 54..54 + 16 + 15);
        // bottom-up: output row 0 is the last stored row
        assert_eq!(g.stored_row_start(0), 16);
        assert_eq!(g.stored_row_start(1), 0);

        let g = Geometry::new(3, 2, 16, 54, false).unwrap();
        assert_eq!(g.pitch(), 8);
        assert_eq!(g.stored_row_start(1), 8);
    }
}
