//! The device-ID marker
//!
//! `DEVICE_ID:<serial>:END` is how the provisioning tool recognizes a board
//! without talking to it: the marker is placed verbatim in the firmware image,
//! so a board in bootloader mode exposes it through its mass-storage drive. The
//! beacon can also announce it once on the console.
//!
//! The layout is contractual. Do not change it.

use core::fmt;

#[cfg(feature = "defmt")]
use defmt::Format;

/// Text in front of the serial number
pub const PREFIX: &str = "DEVICE_ID:";

/// Text after the serial number
pub const SUFFIX: &str = ":END";

/// A device-ID marker, `DEVICE_ID:<serial>:END`
///
/// Borrows the serial number; the full text is produced by [`Display`].
///
/// [`Display`]: core::fmt::Display
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub struct DeviceIdMarker<'a>(&'a str);

impl<'a> DeviceIdMarker<'a> {
    /// Create the marker for a serial number
    pub fn new(serial_number: &'a str) -> Self {
        DeviceIdMarker(serial_number)
    }

    /// The serial number inside the marker
    pub fn serial_number(&self) -> &'a str {
        self.0
    }

    /// The marker as the three pieces it is written in
    pub fn segments(&self) -> [&'a str; 3] {
        [PREFIX, self.0, SUFFIX]
    }

    /// Parses a complete marker
    ///
    /// Returns `None` unless `text` is exactly `DEVICE_ID:<serial>:END` with a
    /// non-empty serial that contains no `:`.
    ///
    /// # Example
    ///
    /// ``` rust
    /// use pico_beacon::DeviceIdMarker;
    ///
    /// let marker = DeviceIdMarker::parse("DEVICE_ID:SN-369366060325:END").unwrap();
    /// assert_eq!(marker.serial_number(), "SN-369366060325");
    ///
    /// assert!(DeviceIdMarker::parse("DEVICE_ID::END").is_none());
    /// ```
    pub fn parse(text: &'a str) -> Option<Self> {
        let serial = text.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
        if serial.is_empty() || serial.contains(':') {
            return None;
        }

        Some(DeviceIdMarker(serial))
    }

    /// Finds the first marker inside a blob, e.g. a firmware image
    ///
    /// Matches the same pattern the provisioning tool uses,
    /// `DEVICE_ID:([^:]+):END`. Candidates whose serial is not valid UTF-8 are
    /// skipped.
    pub fn find(image: &'a [u8]) -> Option<Self> {
        let prefix = PREFIX.as_bytes();
        let suffix = SUFFIX.as_bytes();

        let mut offset = 0;
        while let Some(pos) = find_subslice(&image[offset..], prefix) {
            let body_start = offset + pos + prefix.len();
            let body = &image[body_start..];
            let len = body.iter().position(|&b| b == b':').unwrap_or(body.len());

            if len > 0 && body[len..].starts_with(suffix) {
                if let Ok(serial) = core::str::from_utf8(&body[..len]) {
                    return Some(DeviceIdMarker(serial));
                }
            }

            offset = body_start;
        }

        None
    }
}

impl fmt::Display for DeviceIdMarker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            f.write_str(segment)?;
        }

        Ok(())
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }

    haystack.windows(needle.len()).position(|window| window == needle)
}
