//! Simulated hardware for hosted runs and tests
//!
//! A [`SimClock`] is shared by a [`SimDelay`] and a [`SimConsole`]: delays
//! advance the clock instantly instead of sleeping, and the console stamps
//! every write with the simulated time. This makes the beacon's timing
//! observable without waiting for it.
//!
//! Handles are cheap to clone and all clones see the same state, so a test can
//! keep one handle while the beacon owns another.

use std::{
    cell::{Cell, RefCell},
    convert::Infallible,
    rc::Rc,
};

use crate::report::HEADER;

/// Simulated monotonic clock, starts at zero
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now_ns: Rc<Cell<u64>>,
}

impl SimClock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in nanoseconds
    pub fn now_ns(&self) -> u64 {
        self.now_ns.get()
    }

    /// Current time in milliseconds, rounded down
    pub fn now_ms(&self) -> u64 {
        self.now_ns() / 1_000_000
    }

    /// Moves the clock forward
    pub fn advance_ns(&self, ns: u64) {
        self.now_ns.set(self.now_ns.get().saturating_add(ns));
    }

    /// A delay driven by this clock
    pub fn delay(&self) -> SimDelay {
        SimDelay {
            clock: self.clone(),
        }
    }

    /// A console stamped by this clock
    pub fn console(&self) -> SimConsole {
        SimConsole {
            clock: self.clone(),
            chunks: Default::default(),
            flushes: Default::default(),
        }
    }
}

/// Delay that advances a [`SimClock`] and returns immediately
#[derive(Clone, Debug)]
pub struct SimDelay {
    clock: SimClock,
}

impl embedded_hal::delay::DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(ns.into());
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.advance_ns(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance_ns(u64::from(ms) * 1_000_000);
    }
}

impl embedded_hal_async::delay::DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(ns.into());
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.advance_ns(u64::from(us) * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.clock.advance_ns(u64::from(ms) * 1_000_000);
    }
}

/// One write to a [`SimConsole`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chunk {
    /// Simulated time of the write, in milliseconds
    pub at_ms: u64,
    /// The bytes written
    pub bytes: Vec<u8>,
}

/// Console that records every write with its simulated time
#[derive(Clone, Debug)]
pub struct SimConsole {
    clock: SimClock,
    chunks: Rc<RefCell<Vec<Chunk>>>,
    flushes: Rc<Cell<usize>>,
}

impl SimConsole {
    /// Every write so far, oldest first
    pub fn chunks(&self) -> Vec<Chunk> {
        self.chunks.borrow().clone()
    }

    /// Everything written so far, as text
    pub fn output(&self) -> String {
        let bytes: Vec<u8> = self
            .chunks
            .borrow()
            .iter()
            .flat_map(|chunk| chunk.bytes.iter().copied())
            .collect();

        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Simulated time of the first write
    pub fn first_write_ms(&self) -> Option<u64> {
        self.chunks.borrow().first().map(|chunk| chunk.at_ms)
    }

    /// Simulated times at which a report banner was written
    pub fn report_times_ms(&self) -> Vec<u64> {
        self.chunks
            .borrow()
            .iter()
            .filter(|chunk| chunk.bytes == HEADER.as_bytes())
            .map(|chunk| chunk.at_ms)
            .collect()
    }

    /// Number of flushes so far
    pub fn flushes(&self) -> usize {
        self.flushes.get()
    }

    /// Forgets everything written so far
    pub fn clear(&self) {
        self.chunks.borrow_mut().clear();
        self.flushes.set(0);
    }

    fn record(&self, buf: &[u8]) -> usize {
        if !buf.is_empty() {
            self.chunks.borrow_mut().push(Chunk {
                at_ms: self.clock.now_ms(),
                bytes: buf.to_vec(),
            });
        }

        buf.len()
    }
}

impl embedded_io::ErrorType for SimConsole {
    type Error = Infallible;
}

impl embedded_io::Write for SimConsole {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(self.record(buf))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }
}

impl embedded_io_async::Write for SimConsole {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(self.record(buf))
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn delays_advance_the_shared_clock() {
        use embedded_hal::delay::DelayNs;

        let clock = SimClock::new();
        let mut delay = clock.delay();

        delay.delay_ms(2000);
        delay.delay_us(500);
        delay.delay_ns(250);

        assert_eq!(clock.now_ns(), 2_000_500_250);
        assert_eq!(clock.now_ms(), 2000);
    }

    #[test]
    fn console_stamps_writes() {
        use embedded_hal::delay::DelayNs;
        use embedded_io::Write;

        let clock = SimClock::new();
        let mut delay = clock.delay();
        let mut console = clock.console();
        let observer = console.clone();

        console.write_all(b"boot").unwrap();
        delay.delay_ms(3000);
        console.write_all(b"tick").unwrap();
        console.write_all(b"").unwrap();
        console.flush().unwrap();

        assert_eq!(
            observer.chunks(),
            vec![
                Chunk {
                    at_ms: 0,
                    bytes: b"boot".to_vec()
                },
                Chunk {
                    at_ms: 3000,
                    bytes: b"tick".to_vec()
                },
            ]
        );
        assert_eq!(observer.output(), "boottick");
        assert_eq!(observer.first_write_ms(), Some(0));
        assert_eq!(observer.flushes(), 1);

        observer.clear();
        assert!(console.chunks().is_empty());
        assert_eq!(console.first_write_ms(), None);
    }
}
