//! Who a board is
//!
//! A board is identified by two things: the serial number it was built with
//! (see [`build_info`]) and the unique identifier of its hardware. The latter
//! is read once, through a [`UniqueIdSource`], and kept as a [`BoardId`] for
//! the rest of the program.
//!
//! [`build_info`]: ../build_info/index.html

use core::{
    convert::Infallible,
    fmt::{self, Write as _},
};

#[cfg(feature = "defmt")]
use defmt::Format;

use crate::{build_info::BuildInfo, marker::DeviceIdMarker};

/// Length of the RP2040 unique identifier in bytes
///
/// The RP2040 has no identifier of its own; the 64-bit unique ID of the
/// external flash chip is used instead.
pub const RP2040_UNIQUE_ID_LEN: usize = 8;

/// Hardware that can tell its unique identifier
///
/// `N` is the identifier length in bytes, a constant of the platform.
pub trait UniqueIdSource<const N: usize> {
    /// Error returned when the identifier cannot be read
    ///
    /// Use [`Infallible`] where the platform cannot fail.
    type Error: fmt::Debug;

    /// Reads the unique identifier from the hardware
    fn read_unique_id(&mut self) -> Result<[u8; N], Self::Error>;
}

/// A unique identifier that is known up front
///
/// Useful for simulations and for boards that keep their identifier in
/// memory-mapped registers that are read before the beacon starts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FixedUniqueId<const N: usize>(pub [u8; N]);

impl<const N: usize> UniqueIdSource<N> for FixedUniqueId<N> {
    type Error = Infallible;

    fn read_unique_id(&mut self) -> Result<[u8; N], Self::Error> {
        Ok(self.0)
    }
}

/// The unique identifier of a board, rendered as hexadecimal text
///
/// Always exactly [`BoardId::HEX_LEN`] uppercase hex digits, zero padded, two
/// per byte, most significant nibble first.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct BoardId<const N: usize> {
    bytes: [u8; N],
    digits: [[u8; 2]; N],
}

impl<const N: usize> BoardId<N> {
    /// Length of the hex text
    pub const HEX_LEN: usize = 2 * N;

    /// Renders the identifier
    pub fn from_bytes(bytes: [u8; N]) -> Self {
        let mut digits = [[b'0'; 2]; N];
        for (pair, byte) in digits.iter_mut().zip(bytes.iter()) {
            // `{:02X}` always yields exactly two digits
            let _ = write!(DigitWriter { buf: pair, len: 0 }, "{:02X}", byte);
        }

        BoardId { bytes, digits }
    }

    /// The raw identifier
    pub fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// The identifier as hex text
    pub fn as_str(&self) -> &str {
        // Only ASCII hex digits are ever stored, so this never falls back.
        core::str::from_utf8(self.digits.as_flattened()).unwrap_or_default()
    }
}

impl<const N: usize> fmt::Display for BoardId<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for BoardId<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardId({})", self.as_str())
    }
}

/// `fmt::Write` into a fixed buffer, failing once it is full
struct DigitWriter<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl fmt::Write for DigitWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        self.buf
            .get_mut(self.len..end)
            .ok_or(fmt::Error)?
            .copy_from_slice(s.as_bytes());
        self.len = end;

        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> Format for BoardId<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<const N: usize> serde::Serialize for BoardId<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Everything a board reports about itself
///
/// Built once during initialization; never changes afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct DeviceIdentity<'a, const N: usize> {
    build: BuildInfo<'a>,
    board_id: BoardId<N>,
}

impl<'a, const N: usize> DeviceIdentity<'a, N> {
    /// Create a new identity from already known parts
    pub fn new(build: BuildInfo<'a>, board_id: BoardId<N>) -> Self {
        DeviceIdentity { build, board_id }
    }

    /// Queries the hardware for its unique identifier and builds the identity
    ///
    /// This is the only place the hardware is asked; keep the result.
    pub fn read<S>(build: BuildInfo<'a>, source: &mut S) -> Result<Self, S::Error>
    where
        S: UniqueIdSource<N> + ?Sized,
    {
        let bytes = source.read_unique_id()?;

        Ok(Self::new(build, BoardId::from_bytes(bytes)))
    }

    /// Device serial number
    pub fn serial_number(&self) -> &'a str {
        self.build.serial_number
    }

    /// The pattern the provisioning tool looks for, `DEVICE_ID:<serial>:END`
    pub fn device_id_marker(&self) -> DeviceIdMarker<'a> {
        self.build.device_id_marker()
    }

    /// Unique board identifier as hex text
    pub fn unique_board_id(&self) -> &str {
        self.board_id.as_str()
    }

    /// Unique board identifier
    pub fn board_id(&self) -> &BoardId<N> {
        &self.board_id
    }

    /// Firmware version
    pub fn firmware_version(&self) -> &'a str {
        self.build.firmware_version
    }

    /// Date and time of the build
    pub fn build_timestamp(&self) -> &'a str {
        self.build.build_timestamp
    }

    /// All build-time values
    pub fn build_info(&self) -> &BuildInfo<'a> {
        &self.build
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const BUILD: BuildInfo<'static> = BuildInfo {
        serial_number: "SN-369366060325",
        firmware_version: "1.0.0",
        manufacturing_date: "Jan 1 2024",
        build_timestamp: "Jan 1 2024 00:00:00",
    };

    struct CountingSource {
        reads: usize,
        id: [u8; RP2040_UNIQUE_ID_LEN],
    }

    impl UniqueIdSource<RP2040_UNIQUE_ID_LEN> for CountingSource {
        type Error = Infallible;

        fn read_unique_id(&mut self) -> Result<[u8; RP2040_UNIQUE_ID_LEN], Self::Error> {
            self.reads += 1;
            Ok(self.id)
        }
    }

    #[derive(Debug, PartialEq)]
    struct FlashBusy;

    struct BrokenFlash;

    impl UniqueIdSource<4> for BrokenFlash {
        type Error = FlashBusy;

        fn read_unique_id(&mut self) -> Result<[u8; 4], Self::Error> {
            Err(FlashBusy)
        }
    }

    #[test]
    fn board_id_is_zero_padded_uppercase_hex() {
        let id = BoardId::from_bytes([0xab, 0xcd]);
        assert_eq!(id.as_str(), "ABCD");

        let id = BoardId::from_bytes([0x00, 0x01, 0x0f, 0xf0, 0xff]);
        assert_eq!(id.as_str(), "00010FF0FF");
        assert_eq!(id.bytes(), &[0x00, 0x01, 0x0f, 0xf0, 0xff]);
    }

    #[test]
    fn board_id_length_is_twice_the_byte_length() {
        let samples: [[u8; RP2040_UNIQUE_ID_LEN]; 4] = [
            [0; 8],
            [0xff; 8],
            [0xe6, 0x61, 0x38, 0x52, 0x83, 0x4b, 0x2c, 0x27],
            [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef],
        ];

        for bytes in samples {
            let id = BoardId::from_bytes(bytes);
            assert_eq!(id.as_str().len(), BoardId::<RP2040_UNIQUE_ID_LEN>::HEX_LEN);
            assert_eq!(id.as_str().len(), 16);
            assert!(id.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
        }

        assert_eq!(BoardId::from_bytes([]).as_str(), "");
    }

    #[test]
    fn board_id_matches_upper_hex_formatting() {
        let bytes = [0x00, 0x07, 0x0a, 0x10, 0x7f, 0x80, 0xc3, 0xff];
        let expected: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();

        assert_eq!(BoardId::from_bytes(bytes).as_str(), expected);
    }

    #[test]
    fn digit_writer_stops_when_full() {
        use core::fmt::Write;

        let mut buf = [0u8; 2];
        let mut writer = DigitWriter {
            buf: &mut buf,
            len: 0,
        };

        assert!(writer.write_str("AB").is_ok());
        assert!(writer.write_str("C").is_err());
        assert_eq!(&buf, b"AB");
    }

    #[test]
    fn board_id_display_and_debug() {
        let id = BoardId::from_bytes([0xde, 0xad]);
        assert_eq!(format!("{}", id), "DEAD");
        assert_eq!(format!("{:?}", id), "BoardId(DEAD)");
    }

    #[test]
    fn identity_reads_the_hardware_once() {
        let mut source = CountingSource {
            reads: 0,
            id: [0xe6, 0x61, 0x38, 0x52, 0x83, 0x4b, 0x2c, 0x27],
        };

        let identity = DeviceIdentity::<RP2040_UNIQUE_ID_LEN>::read(BUILD, &mut source).unwrap();
        assert_eq!(source.reads, 1);

        let first = identity.unique_board_id();
        for _ in 0..3 {
            assert_eq!(identity.unique_board_id(), first);
        }
        assert_eq!(first, "E6613852834B2C27");
        assert_eq!(source.reads, 1);
    }

    #[test]
    fn identity_accessors() {
        let identity = DeviceIdentity::<2>::read(BUILD, &mut FixedUniqueId([0xab, 0xcd])).unwrap();

        assert_eq!(identity.serial_number(), "SN-369366060325");
        assert_eq!(identity.firmware_version(), "1.0.0");
        assert_eq!(identity.build_timestamp(), "Jan 1 2024 00:00:00");
        assert_eq!(identity.unique_board_id(), "ABCD");
        assert_eq!(identity.board_id().bytes(), &[0xab, 0xcd]);
        assert_eq!(identity.build_info(), &BUILD);
        assert_eq!(
            format!("{}", identity.device_id_marker()),
            "DEVICE_ID:SN-369366060325:END"
        );
    }

    #[test]
    fn identity_propagates_hardware_errors() {
        let result = DeviceIdentity::<4>::read(BUILD, &mut BrokenFlash);
        assert_eq!(result.unwrap_err(), FlashBusy);
    }
}
