//! Configuration of the beacon
//!
//! The defaults are what the firmware ships with. The timings exist as fields
//! so hosted builds and tests can shorten them.

#[cfg(feature = "defmt")]
use defmt::Format;

/// Beacon configuration
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// How long to wait after initialization before anything is written, so
    /// a terminal has time to attach to the console.
    ///
    /// Defaults to 2000 ms.
    pub warm_up_ms: u32,
    /// Pause between two reports.
    ///
    /// Defaults to 3000 ms.
    pub report_interval_ms: u32,
    /// Line terminator written to the console
    pub line_ending: LineEnding,
    /// Write the device-ID marker on its own line once the warm-up is over,
    /// before the first report.
    ///
    /// The marker is always present in the firmware image; this only adds it
    /// to the console output. Defaults to `false`.
    pub announce_device_id: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            warm_up_ms: 2000,
            report_interval_ms: 3000,
            line_ending: Default::default(),
            announce_device_id: false,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// The line terminator used on the console
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`, what the Pico SDK's stdio puts on the wire for `\n`
    CrLf,
}

impl LineEnding {
    /// The terminator as text
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        LineEnding::CrLf
    }
}
