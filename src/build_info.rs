//! Values fixed when the firmware is built
//!
//! The serial number and firmware version are handed in by the provisioning
//! step through the `PICO_BEACON_SERIAL_NUMBER` and
//! `PICO_BEACON_FIRMWARE_VERSION` environment variables; the build timestamp is
//! taken from `SOURCE_DATE_EPOCH` or the build machine's clock. See `build.rs`.
//!
//! Malformed values are rejected at compile time.

use core::fmt;

#[cfg(feature = "defmt")]
use defmt::Format;

use crate::marker::DeviceIdMarker;

/// Device serial number, `SN-<digits>`
pub const SERIAL_NUMBER: &str = env!("BEACON_SERIAL_NUMBER");

/// Firmware version, dot-separated decimal components
pub const FIRMWARE_VERSION: &str = env!("BEACON_FIRMWARE_VERSION");

/// The firmware version as an integer, e.g. `1.0.0` is `100`
///
/// See [`firmware_version_literal`].
pub const FIRMWARE_VERSION_LITERAL: u32 = match firmware_version_literal(FIRMWARE_VERSION) {
    Some(literal) => literal,
    None => panic!("firmware version must be dot-separated decimal components, e.g. 1.0.0"),
};

/// Date of the build, `Mmm dd yyyy`
pub const MANUFACTURING_DATE: &str = env!("BEACON_BUILD_DATE");

/// Date and time of the build, `Mmm dd yyyy hh:mm:ss`
pub const BUILD_TIMESTAMP: &str =
    concat!(env!("BEACON_BUILD_DATE"), " ", env!("BEACON_BUILD_TIME"));

/// The device-ID marker for [`SERIAL_NUMBER`]
///
/// Do not change this layout: the provisioning tool recognizes a board by
/// finding this exact pattern.
pub const DEVICE_ID_MARKER: &str = concat!("DEVICE_ID:", env!("BEACON_SERIAL_NUMBER"), ":END");

/// [`DEVICE_ID_MARKER`] as a byte array, for placing in the firmware image
pub const DEVICE_ID_MARKER_BYTES: [u8; DEVICE_ID_MARKER.len()] = {
    let src = DEVICE_ID_MARKER.as_bytes();
    let mut out = [0u8; DEVICE_ID_MARKER.len()];
    let mut i = 0;
    while i < out.len() {
        out[i] = src[i];
        i += 1;
    }
    out
};

const _: () = assert!(
    is_valid_serial_number(SERIAL_NUMBER),
    "serial number must be `SN-` followed by digits, e.g. SN-369366060325"
);

/// Returns whether `serial` has the `SN-<digits>` layout
pub const fn is_valid_serial_number(serial: &str) -> bool {
    let bytes = serial.as_bytes();
    if bytes.len() <= 3 || bytes[0] != b'S' || bytes[1] != b'N' || bytes[2] != b'-' {
        return false;
    }

    let mut i = 3;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            return false;
        }
        i += 1;
    }

    true
}

/// Returns whether `version` is one or more dot-separated decimal components
pub const fn is_valid_firmware_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    if bytes.is_empty() {
        return false;
    }

    let mut component_len = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => component_len += 1,
            b'.' if component_len > 0 => component_len = 0,
            _ => return false,
        }
        i += 1;
    }

    component_len > 0
}

/// Encodes a firmware version as an integer
///
/// The digits of all components are concatenated and right-padded with zeros
/// to at least three digits: `1.0.0` is `100`, `2.1` is `210`, `1.10.2` is
/// `1102`.
///
/// Returns `None` if `version` is malformed or the result does not fit a
/// `u32`.
pub const fn firmware_version_literal(version: &str) -> Option<u32> {
    if !is_valid_firmware_version(version) {
        return None;
    }

    let bytes = version.as_bytes();
    let mut literal: u32 = 0;
    let mut digits = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            literal = match literal.checked_mul(10) {
                Some(shifted) => match shifted.checked_add((bytes[i] - b'0') as u32) {
                    Some(value) => value,
                    None => return None,
                },
                None => return None,
            };
            digits += 1;
        }
        i += 1;
    }

    while digits < 3 {
        literal *= 10;
        digits += 1;
    }

    Some(literal)
}

/// A build-time value did not have the expected layout
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum InvalidBuildInfo {
    /// The serial number is not `SN-<digits>`
    SerialNumber,
    /// The firmware version is not dot-separated decimal components
    FirmwareVersion,
}

impl fmt::Display for InvalidBuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBuildInfo::SerialNumber => f.write_str("malformed serial number"),
            InvalidBuildInfo::FirmwareVersion => f.write_str("malformed firmware version"),
        }
    }
}

/// The values a board reports that are fixed at build time
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildInfo<'a> {
    /// Device serial number, `SN-<digits>`
    pub serial_number: &'a str,
    /// Firmware version, e.g. `1.0.0`
    pub firmware_version: &'a str,
    /// Date of the build
    pub manufacturing_date: &'a str,
    /// Date and time of the build
    pub build_timestamp: &'a str,
}

impl BuildInfo<'static> {
    /// The values compiled into this firmware
    pub const CURRENT: Self = BuildInfo {
        serial_number: SERIAL_NUMBER,
        firmware_version: FIRMWARE_VERSION,
        manufacturing_date: MANUFACTURING_DATE,
        build_timestamp: BUILD_TIMESTAMP,
    };
}

impl<'a> BuildInfo<'a> {
    /// Checks the layout of the serial number and firmware version
    ///
    /// [`BuildInfo::CURRENT`] always passes, as it is checked when compiling.
    pub fn validate(&self) -> Result<(), InvalidBuildInfo> {
        if !is_valid_serial_number(self.serial_number) {
            return Err(InvalidBuildInfo::SerialNumber);
        }
        if !is_valid_firmware_version(self.firmware_version) {
            return Err(InvalidBuildInfo::FirmwareVersion);
        }

        Ok(())
    }

    /// The firmware version as an integer, see [`firmware_version_literal`]
    pub fn firmware_version_literal(&self) -> Option<u32> {
        firmware_version_literal(self.firmware_version)
    }

    /// The device-ID marker for this serial number
    pub fn device_id_marker(&self) -> DeviceIdMarker<'a> {
        DeviceIdMarker::new(self.serial_number)
    }
}

impl Default for BuildInfo<'static> {
    fn default() -> Self {
        Self::CURRENT
    }
}
