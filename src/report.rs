//! The device information report
//!
//! Every report has the same layout:
//!
//! ```text
//!
//! ======== DEVICE INFORMATION ========
//! Device Serial: SN-369366060325
//! Unique Board ID: E6613852834B2C27
//! Firmware Version: 1.0.0
//! Build Date: Jan  1 2024 00:00:00
//! ===================================
//!
//! ```
//!
//! [`Report`] writes it, [`DeviceInfo`] reads it back from console output.

use core::fmt;

#[cfg(feature = "defmt")]
use defmt::Format;

use crate::{configs::LineEnding, identity::DeviceIdentity, io_type, maybe_async_attr};

/// Opening banner
pub const HEADER: &str = "======== DEVICE INFORMATION ========";

/// Closing banner
pub const FOOTER: &str = "===================================";

/// Label of the serial number line
pub const SERIAL_LABEL: &str = "Device Serial";

/// Label of the unique board ID line
pub const BOARD_ID_LABEL: &str = "Unique Board ID";

/// Label of the firmware version line
pub const FIRMWARE_LABEL: &str = "Firmware Version";

/// Label of the build timestamp line
pub const BUILD_DATE_LABEL: &str = "Build Date";

const FIELD_SEPARATOR: &str = ": ";

/// One report about a board
///
/// Holds no state of its own: the same identity always yields the same bytes.
#[derive(Copy, Clone, Debug)]
pub struct Report<'r, 'a, const N: usize> {
    identity: &'r DeviceIdentity<'a, N>,
    line_ending: LineEnding,
}

impl<'r, 'a, const N: usize> Report<'r, 'a, N> {
    /// Create a new report
    pub fn new(identity: &'r DeviceIdentity<'a, N>, line_ending: LineEnding) -> Self {
        Report {
            identity,
            line_ending,
        }
    }

    /// The labeled fields, in the order they are written
    pub fn fields(&self) -> [(&'static str, &'r str); 4] {
        [
            (SERIAL_LABEL, self.identity.serial_number()),
            (BOARD_ID_LABEL, self.identity.unique_board_id()),
            (FIRMWARE_LABEL, self.identity.firmware_version()),
            (BUILD_DATE_LABEL, self.identity.build_timestamp()),
        ]
    }

    /// The report as the pieces it is written in
    pub fn segments(&self) -> [&'r str; 22] {
        let eol = self.line_ending.as_str();
        let [serial, board_id, firmware, build_date] = self.fields();

        [
            eol,
            HEADER,
            eol,
            serial.0,
            FIELD_SEPARATOR,
            serial.1,
            eol,
            board_id.0,
            FIELD_SEPARATOR,
            board_id.1,
            eol,
            firmware.0,
            FIELD_SEPARATOR,
            firmware.1,
            eol,
            build_date.0,
            FIELD_SEPARATOR,
            build_date.1,
            eol,
            FOOTER,
            eol,
            eol,
        ]
    }

    /// Writes the report and flushes the console
    #[maybe_async_attr]
    pub async fn write_to<W>(&self, console: &mut W) -> Result<(), W::Error>
    where
        W: io_type::Write + ?Sized,
    {
        write_segments(console, &self.segments()).await
    }
}

/// Writes text pieces back to back, then flushes the console
#[maybe_async_attr]
pub(crate) async fn write_segments<W>(console: &mut W, segments: &[&str]) -> Result<(), W::Error>
where
    W: io_type::Write + ?Sized,
{
    for segment in segments {
        console.write_all(segment.as_bytes()).await?;
    }
    console.flush().await
}

impl<const N: usize> fmt::Display for Report<'_, '_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            f.write_str(segment)?;
        }

        Ok(())
    }
}

/// Board information read back from console output
///
/// Any field that was not found is `None`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceInfo<'a> {
    /// Device serial number
    pub serial_number: Option<&'a str>,
    /// Unique board identifier
    pub unique_board_id: Option<&'a str>,
    /// Firmware version
    pub firmware_version: Option<&'a str>,
    /// Build timestamp
    pub build_date: Option<&'a str>,
}

impl<'a> DeviceInfo<'a> {
    /// Collects the report fields from console text
    ///
    /// Lines look like `Label: value`; whitespace around the colon and `\r\n`
    /// line endings are accepted, other lines are ignored. When the text holds
    /// several reports the last value of each field wins.
    ///
    /// # Example
    ///
    /// ``` rust
    /// use pico_beacon::DeviceInfo;
    ///
    /// let info = DeviceInfo::parse("Device Serial : SN-369366060325\r\nnoise\r\n");
    /// assert_eq!(info.serial_number, Some("SN-369366060325"));
    /// assert!(!info.is_complete());
    /// ```
    pub fn parse(text: &'a str) -> Self {
        let mut info = DeviceInfo::default();

        for line in text.lines() {
            let Some((label, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match label.trim() {
                SERIAL_LABEL => info.serial_number = Some(value),
                BOARD_ID_LABEL => info.unique_board_id = Some(value),
                FIRMWARE_LABEL => info.firmware_version = Some(value),
                BUILD_DATE_LABEL => info.build_date = Some(value),
                _ => {}
            }
        }

        info
    }

    /// Returns whether all four fields were found
    pub fn is_complete(&self) -> bool {
        self.serial_number.is_some()
            && self.unique_board_id.is_some()
            && self.firmware_version.is_some()
            && self.build_date.is_some()
    }
}
