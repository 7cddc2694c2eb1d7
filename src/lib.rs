//! Identity beacon for Raspberry Pi Pico boards
//!
//! A board running this crate prints who it is on its serial console, over
//! and over: the serial number assigned at build time, the unique identifier
//! burnt into its flash chip, the firmware version and the build timestamp.
//! Production tooling attached to the console uses these lines to track
//! boards, and scans firmware images for the [device-ID marker].
//!
//! The recommended way to use this crate is the [high-level interface]: a
//! [`Beacon`] is created `Uninitialized`, initialized once, and then reports
//! forever. The pieces it is built from ([identity], [report formatting],
//! [build information]) are public as well.
//!
//! This crate is built on top of [`embedded-hal`] and [`embedded-io`], which
//! means it is portable and can be used on any platform that implements those
//! APIs. With the `async` feature (on by default) the delay and console are
//! driven through `embedded-hal-async` and `embedded-io-async` instead.
//!
//! [device-ID marker]: marker/index.html
//! [high-level interface]: hl/index.html
//! [identity]: identity/index.html
//! [report formatting]: report/index.html
//! [build information]: build_info/index.html
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal
//! [`embedded-io`]: https://crates.io/crates/embedded-io
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "async")]
use maybe_async::must_be_async as maybe_async_attr;
#[cfg(not(feature = "async"))]
use maybe_async::must_be_sync as maybe_async_attr;

#[cfg(not(feature = "async"))]
use embedded_hal as hal_type;
#[cfg(feature = "async")]
use embedded_hal_async as hal_type;

#[cfg(not(feature = "async"))]
use embedded_io as io_type;
#[cfg(feature = "async")]
use embedded_io_async as io_type;

#[macro_use]
mod log;

pub mod build_info;
pub mod configs;
pub mod hl;
pub mod identity;
pub mod marker;
pub mod report;

#[cfg(any(test, feature = "std"))]
pub mod sim;

#[cfg(test)]
mod timestamp;

pub use crate::{
    build_info::{
        BuildInfo, InvalidBuildInfo, BUILD_TIMESTAMP, DEVICE_ID_MARKER, DEVICE_ID_MARKER_BYTES,
        FIRMWARE_VERSION, FIRMWARE_VERSION_LITERAL, MANUFACTURING_DATE, SERIAL_NUMBER,
    },
    configs::{Config, LineEnding},
    hl::{Beacon, Error, Reporting, Uninitialized},
    identity::{
        BoardId, DeviceIdentity, FixedUniqueId, UniqueIdSource, RP2040_UNIQUE_ID_LEN,
    },
    marker::DeviceIdMarker,
    report::{DeviceInfo, Report},
};
