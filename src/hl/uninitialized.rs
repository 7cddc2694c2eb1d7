use core::num::Wrapping;

use embedded_hal::digital::OutputPin;

use crate::{
    build_info::BuildInfo,
    configs::Config,
    hal_type,
    identity::{DeviceIdentity, UniqueIdSource},
    io_type, maybe_async_attr,
    report::write_segments,
    Beacon, Error, Reporting, Uninitialized,
};

impl<CON, LED> Beacon<CON, LED, Uninitialized>
where
    CON: io_type::Write,
    LED: OutputPin,
{
    /// Create a new instance of `Beacon` with the default configuration
    ///
    /// Requires the console the report is written to and the onboard LED,
    /// configured as an output.
    pub fn new(console: CON, led: LED) -> Self {
        Self::with_config(console, led, Config::default())
    }

    /// Create a new instance of `Beacon`
    pub fn with_config(console: CON, led: LED, config: Config) -> Self {
        Beacon {
            console,
            led,
            config,
            state: Uninitialized,
        }
    }

    /// Initialize the beacon
    ///
    /// Checks the build-time values, reads the unique identifier from the
    /// hardware (the only time it is ever read), then blocks for the warm-up
    /// delay so a terminal can attach to the console. Nothing is written
    /// before that delay has passed. With [`Config::announce_device_id`] the
    /// device-ID marker is then written once on its own line.
    ///
    /// A failure here is the only failure the beacon has. Firmware is expected
    /// to treat it as fatal.
    #[maybe_async_attr]
    pub async fn init<'a, S, D, const N: usize>(
        mut self,
        build: BuildInfo<'a>,
        id_source: &mut S,
        delay: &mut D,
    ) -> Result<Beacon<CON, LED, Reporting<'a, N>>, Error<S::Error>>
    where
        S: UniqueIdSource<N> + ?Sized,
        D: hal_type::delay::DelayNs,
    {
        build.validate()?;

        let identity = DeviceIdentity::read(build, id_source).map_err(Error::UniqueId)?;
        info!(
            "serial number {}, unique board ID {}",
            identity.serial_number(),
            identity.unique_board_id()
        );

        delay.delay_ms(self.config.warm_up_ms).await;

        if self.config.announce_device_id {
            let [prefix, serial, suffix] = identity.device_id_marker().segments();
            let line_ending = self.config.line_ending.as_str();
            if write_segments(&mut self.console, &[prefix, serial, suffix, line_ending])
                .await
                .is_err()
            {
                warn!("device ID marker could not be written");
            }
        }

        Ok(Beacon {
            console: self.console,
            led: self.led,
            config: self.config,
            state: Reporting {
                identity,
                reports_sent: Wrapping(0),
            },
        })
    }
}
