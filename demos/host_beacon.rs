//! Runs the beacon on the host, printing to stdout
//!
//! Uses the values compiled into the library and a made-up board identifier.
//! Timings are shortened; set `RUST_LOG=debug` to see the beacon's own logs.
//!
//! ```text
//! cargo run --example host_beacon --features std,log
//! ```

use std::io::Write as _;

use pico_beacon::{hl::Beacon, BuildInfo, Config, FixedUniqueId, LineEnding, RP2040_UNIQUE_ID_LEN};

/// Standard output as a console
struct Stdout(std::io::Stdout);

impl embedded_io_async::ErrorType for Stdout {
    type Error = std::io::Error;
}

impl embedded_io_async::Write for Stdout {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.0.write(buf)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}

/// The indicator LED of a host is imaginary
struct NoLed;

impl embedded_hal::digital::ErrorType for NoLed {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for NoLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Delay backed by the tokio timer
struct TokioDelay;

impl embedded_hal_async::delay::DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(std::time::Duration::from_nanos(ns.into())).await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let config = Config {
        warm_up_ms: 500,
        report_interval_ms: 1000,
        line_ending: LineEnding::Lf,
        announce_device_id: true,
    };
    let mut id_source: FixedUniqueId<RP2040_UNIQUE_ID_LEN> =
        FixedUniqueId([0xe6, 0x61, 0x38, 0x52, 0x83, 0x4b, 0x2c, 0x27]);
    let mut delay = TokioDelay;

    let beacon = match Beacon::with_config(Stdout(std::io::stdout()), NoLed, config)
        .init(BuildInfo::CURRENT, &mut id_source, &mut delay)
        .await
    {
        Ok(beacon) => beacon,
        Err(e) => {
            log::error!("beacon failed to start: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("reporting as {}", beacon.identity().serial_number());
    match beacon.run(&mut delay).await {}
}
