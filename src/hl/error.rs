use core::fmt;
use core::fmt::{Display, Formatter};

#[cfg(feature = "defmt")]
use defmt::Format;

use crate::build_info::InvalidBuildInfo;

/// An error that can occur while initializing the beacon
///
/// `E` is the error type of the [`UniqueIdSource`] that was used.
///
/// Once the beacon is reporting nothing can fail any more: console errors are
/// dropped and the next report is attempted on schedule.
///
/// [`UniqueIdSource`]: crate::identity::UniqueIdSource
#[derive(Debug)]
pub enum Error<E> {
    /// The hardware did not tell its unique identifier
    UniqueId(E),

    /// The build-time values are malformed
    BuildInfo(InvalidBuildInfo),
}

impl<E> From<InvalidBuildInfo> for Error<E> {
    fn from(error: InvalidBuildInfo) -> Self {
        Error::BuildInfo(error)
    }
}

impl<E> Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UniqueId(error) => write!(f, "failed to read the unique board ID: {:?}", error),
            Error::BuildInfo(error) => write!(f, "invalid build information: {}", error),
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for Error<E> where E: fmt::Debug {}

#[cfg(feature = "defmt")]
impl<E> Format for Error<E>
where
    E: defmt::Format,
{
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::UniqueId(error) => defmt::write!(f, "UniqueId({:?})", error),
            Error::BuildInfo(error) => defmt::write!(f, "BuildInfo({:?})", error),
        }
    }
}

// Tests
#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug)]
    struct FlashBusy;

    #[test]
    fn display_names_the_failure() {
        let error = Error::<FlashBusy>::UniqueId(FlashBusy);
        assert_eq!(
            error.to_string(),
            "failed to read the unique board ID: FlashBusy"
        );

        let error: Error<FlashBusy> = InvalidBuildInfo::SerialNumber.into();
        assert_eq!(
            error.to_string(),
            "invalid build information: malformed serial number"
        );
        assert_eq!(format!("{:?}", error), "BuildInfo(SerialNumber)");
    }

    #[cfg(feature = "defmt")]
    #[test]
    fn test_defmt() {
        let error = Error::<u8>::BuildInfo(InvalidBuildInfo::FirmwareVersion);

        defmt::info!("error: {:?}", error);
    }
}
