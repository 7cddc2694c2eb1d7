//! High-level interface to the beacon
//!
//! The entry point to this API is the [Beacon] struct. Please refer to the
//! documentation there for more details.
//!
//! A beacon goes through two states. It is created [`Uninitialized`], owning
//! the console and the indicator LED. [`Beacon::init`] reads the board's
//! identity, waits for the console to settle and returns the beacon in the
//! [`Reporting`] state, which writes the device information report at a fixed
//! interval, forever.

use core::{fmt, num::Wrapping};

pub use error::*;
#[allow(unused_imports)]
pub use reporting::*;
#[allow(unused_imports)]
pub use uninitialized::*;

use crate::{configs::Config, identity::DeviceIdentity};

mod error;
mod reporting;
mod uninitialized;

/// Entry point to the beacon API
///
/// `CON` is the console the report is written to, `LED` the onboard indicator
/// pin, already configured as an output. Both are owned for as long as the
/// beacon runs, which on a board is forever.
///
/// The indicator is held but never driven: its level stays whatever the HAL
/// configured.
pub struct Beacon<CON, LED, State> {
    console: CON,
    led: LED,
    config: Config,
    state: State,
}

// Can't be derived without putting requirements on `CON` and `LED`.
impl<CON, LED, State> fmt::Debug for Beacon<CON, LED, State>
where
    State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Beacon {{ config: {:?}, state: ", self.config)?;
        self.state.fmt(f)?;
        write!(f, ", .. }}")?;

        Ok(())
    }
}

impl<CON, LED, State> Beacon<CON, LED, State> {
    /// The configuration the beacon runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gives back the console and the indicator pin
    ///
    /// Firmware never does this; it exists for hosted runs and tests.
    pub fn into_parts(self) -> (CON, LED) {
        (self.console, self.led)
    }
}

/// Indicates that the beacon has not been initialized yet
#[derive(Copy, Clone, Debug)]
pub struct Uninitialized;

/// Indicates that the beacon knows its identity and is reporting it
#[derive(Copy, Clone, Debug)]
pub struct Reporting<'a, const N: usize> {
    identity: DeviceIdentity<'a, N>,
    reports_sent: Wrapping<u32>,
}
