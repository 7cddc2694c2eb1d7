use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_SERIAL_NUMBER: &str = "SN-000000000000";

#[path = "src/timestamp.rs"]
mod timestamp;

use timestamp::format_timestamp;

fn main() {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed=src/timestamp.rs");

    // handle the device serial number
    {
        println!("cargo::rerun-if-env-changed=PICO_BEACON_SERIAL_NUMBER");
        let serial = match env::var("PICO_BEACON_SERIAL_NUMBER") {
            Ok(serial) => serial,
            Err(_) => {
                println!(
                    "cargo::warning=PICO_BEACON_SERIAL_NUMBER not set, using {}",
                    DEFAULT_SERIAL_NUMBER
                );
                DEFAULT_SERIAL_NUMBER.to_string()
            }
        };
        println!("cargo::rustc-env=BEACON_SERIAL_NUMBER={}", serial.trim());
    }

    // handle the firmware version
    {
        println!("cargo::rerun-if-env-changed=PICO_BEACON_FIRMWARE_VERSION");
        let version = env::var("PICO_BEACON_FIRMWARE_VERSION")
            .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION not set"));
        println!("cargo::rustc-env=BEACON_FIRMWARE_VERSION={}", version.trim());
    }

    // handle the build timestamp, `__DATE__` and `__TIME__` layout
    {
        println!("cargo::rerun-if-env-changed=SOURCE_DATE_EPOCH");
        let epoch = match env::var("SOURCE_DATE_EPOCH") {
            Ok(var) => var
                .trim()
                .parse::<u64>()
                .expect("SOURCE_DATE_EPOCH must be a unix timestamp"),
            Err(_) => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system clock before 1970")
                .as_secs(),
        };

        let (date, time) = format_timestamp(epoch);
        println!("cargo::rustc-env=BEACON_BUILD_DATE={}", date);
        println!("cargo::rustc-env=BEACON_BUILD_TIME={}", time);
    }
}
