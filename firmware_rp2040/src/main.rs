//! Identity beacon firmware for the Raspberry Pi Pico
//!
//! Reports over USB as a CDC-ACM serial port with the Raspberry Pi vendor ID,
//! the way the Pico SDK's USB stdio shows up. Build with the serial number of
//! the board in `PICO_BEACON_SERIAL_NUMBER`:
//!
//! ```text
//! PICO_BEACON_SERIAL_NUMBER=SN-369366060325 cargo run --release
//! ```
#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    flash::{self, Blocking, Flash},
    gpio::{Level, Output},
    peripherals::{FLASH, USB},
    usb::{Driver, InterruptHandler},
};
use embassy_time::Delay;
use embassy_usb::{
    class::cdc_acm::{CdcAcmClass, Sender, State},
    driver::EndpointError,
    Builder, UsbDevice,
};
use embedded_io_async::ErrorKind;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pico_beacon::{
    Beacon, BuildInfo, UniqueIdSource, DEVICE_ID_MARKER, DEVICE_ID_MARKER_BYTES,
    RP2040_UNIQUE_ID_LEN, SERIAL_NUMBER,
};

const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Raspberry Pi vendor ID, what the provisioning tool looks for
const USB_VID: u16 = 0x2e8a;
/// Pico SDK USB stdio product ID
const USB_PID: u16 = 0x000a;

const MAX_FULL_SPEED_PACKET_SIZE: u8 = 64;

/// `DEVICE_ID:<serial>:END`, kept in the image for the provisioning tool
#[used]
static DEVICE_ID_PATTERN: [u8; DEVICE_ID_MARKER.len()] = DEVICE_ID_MARKER_BYTES;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

type UsbDriver = Driver<'static, USB>;

/// The 64-bit unique ID of the external flash chip
struct FlashUniqueId<'d>(Flash<'d, FLASH, Blocking, FLASH_SIZE>);

impl UniqueIdSource<RP2040_UNIQUE_ID_LEN> for FlashUniqueId<'_> {
    type Error = flash::Error;

    fn read_unique_id(&mut self) -> Result<[u8; RP2040_UNIQUE_ID_LEN], Self::Error> {
        let mut id = [0; RP2040_UNIQUE_ID_LEN];
        self.0.blocking_unique_id(&mut id)?;

        Ok(id)
    }
}

/// The sending half of the CDC-ACM class as a console
///
/// Output is dropped while no terminal holds DTR, like the SDK's USB stdio.
struct UsbConsole {
    sender: Sender<'static, UsbDriver>,
    packet_full: bool,
}

impl UsbConsole {
    fn packet_size(&self) -> usize {
        usize::from(self.sender.max_packet_size())
    }
}

fn endpoint_error(error: EndpointError) -> ErrorKind {
    match error {
        EndpointError::BufferOverflow => ErrorKind::InvalidInput,
        EndpointError::Disabled => ErrorKind::NotConnected,
    }
}

impl embedded_io_async::ErrorType for UsbConsole {
    type Error = ErrorKind;
}

impl embedded_io_async::Write for UsbConsole {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.sender.dtr() {
            return Ok(buf.len());
        }

        let len = buf.len().min(self.packet_size());
        self.sender
            .write_packet(&buf[..len])
            .await
            .map_err(endpoint_error)?;
        self.packet_full = len == self.packet_size();

        Ok(len)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        // a full packet leaves the host waiting for more, end the transfer
        if self.packet_full && self.sender.dtr() {
            self.sender.write_packet(&[]).await.map_err(endpoint_error)?;
        }
        self.packet_full = false;

        Ok(())
    }
}

#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let mut config = embassy_usb::Config::new(USB_VID, USB_PID);
    config.manufacturer = Some("Raspberry Pi");
    config.product = Some("Pico");
    config.serial_number = Some(SERIAL_NUMBER);
    config.max_power = 100;
    config.max_packet_size_0 = MAX_FULL_SPEED_PACKET_SIZE;

    // Required for Windows support.
    config.composite_with_iads = true;
    config.device_class = 0xEF;
    config.device_sub_class = 0x02;
    config.device_protocol = 0x01;

    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static STATE: StaticCell<State> = StaticCell::new();

    let mut builder = Builder::new(
        Driver::new(p.USB, Irqs),
        config,
        &mut CONFIG_DESCRIPTOR.init([0; 256])[..],
        &mut BOS_DESCRIPTOR.init([0; 256])[..],
        &mut [],
        &mut CONTROL_BUF.init([0; 64])[..],
    );
    let class = CdcAcmClass::new(
        &mut builder,
        STATE.init(State::new()),
        MAX_FULL_SPEED_PACKET_SIZE.into(),
    );
    let (sender, _receiver) = class.split();
    defmt::unwrap!(spawner.spawn(usb_task(builder.build())));

    let console = UsbConsole {
        sender,
        packet_full: false,
    };
    let led = Output::new(p.PIN_25, Level::Low);
    let mut id_source = FlashUniqueId(Flash::new_blocking(p.FLASH));
    let mut delay = Delay;

    let beacon = match Beacon::new(console, led)
        .init(BuildInfo::CURRENT, &mut id_source, &mut delay)
        .await
    {
        Ok(beacon) => beacon,
        Err(e) => defmt::panic!("beacon failed to start: {}", e),
    };
    info!(
        "firmware {} built {}",
        beacon.identity().firmware_version(),
        beacon.identity().build_timestamp()
    );

    match beacon.run(&mut delay).await {}
}
