use core::{convert::Infallible, num::Wrapping};

use embedded_hal::digital::OutputPin;

use crate::{
    hal_type, identity::DeviceIdentity, io_type, maybe_async_attr, report::Report, Beacon,
    Reporting,
};

impl<'a, CON, LED, const N: usize> Beacon<CON, LED, Reporting<'a, N>>
where
    CON: io_type::Write,
    LED: OutputPin,
{
    /// Who this board is
    pub fn identity(&self) -> &DeviceIdentity<'a, N> {
        &self.state.identity
    }

    /// The report this beacon writes
    ///
    /// Every call returns the same text.
    pub fn report(&self) -> Report<'_, 'a, N> {
        Report::new(&self.state.identity, self.config.line_ending)
    }

    /// Number of reports written successfully, wrapping around on overflow
    pub fn reports_sent(&self) -> u32 {
        self.state.reports_sent.0
    }

    /// Writes one report to the console right away
    #[maybe_async_attr]
    pub async fn emit_report(&mut self) -> Result<(), CON::Error> {
        let report = Report::new(&self.state.identity, self.config.line_ending);
        report.write_to(&mut self.console).await?;
        self.state.reports_sent += Wrapping(1);

        Ok(())
    }

    /// Writes one report, then waits out the report interval
    ///
    /// A console error is logged and dropped; the next report is attempted on
    /// schedule.
    #[maybe_async_attr]
    pub async fn step<D>(&mut self, delay: &mut D)
    where
        D: hal_type::delay::DelayNs,
    {
        match self.emit_report().await {
            Ok(()) => debug!("report {} written", self.state.reports_sent.0),
            Err(_) => warn!("report could not be written"),
        }

        delay.delay_ms(self.config.report_interval_ms).await;
    }

    /// Reports forever
    #[maybe_async_attr]
    pub async fn run<D>(mut self, delay: &mut D) -> Infallible
    where
        D: hal_type::delay::DelayNs,
    {
        loop {
            self.step(delay).await;
        }
    }
}
