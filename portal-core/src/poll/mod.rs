//! The polling loop
//!
//! One tick samples every peripheral in a fixed order:
//!
//! 1. Button 1, then button 2 (edge-detected)
//! 2. Touchscreen (every contact is reported, no smoothing)
//! 3. Console (complete lines are echoed)
//!
//! [`PollLoop::run`] repeats ticks forever with a fixed sleep between
//! them. There is no recovery: the first read error ends the loop.

use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;
use heapless::{String, Vec};
use portal_hal::{InputPin, UartRx, UartTx};

use crate::config::{BoardConfig, ConsoleMode, MAX_PREFIX_LEN};
use crate::console::LineAssembler;
use crate::events::{Notification, MAX_MESSAGE_LEN};
use crate::input::{Button, ButtonEvent, ButtonId};
use crate::traits::{TouchError, TouchSource};

/// Notifications kept in a [`TickReport`]
pub const MAX_TICK_NOTIFICATIONS: usize = 8;

/// Upper bound on console bytes consumed by one non-blocking tick
///
/// Keeps a flooding sender from starving the buttons and touchscreen.
pub const MAX_DRAIN_PER_TICK: usize = 256;

/// Chunk size for non-blocking console reads
const READ_CHUNK: usize = 32;

/// Error that stopped the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopError<RE, WE> {
    /// Touchscreen read failed
    Touch(TouchError),
    /// Console receive failed
    ConsoleRead(RE),
    /// Console transmit failed
    ConsoleWrite(WE),
}

/// What a single tick did
#[derive(Debug, Default)]
pub struct TickReport {
    /// Notifications in emission order
    pub notifications: Vec<Notification, MAX_TICK_NOTIFICATIONS>,
    /// Notifications written to the console but not kept in the report
    pub dropped: u16,
}

impl TickReport {
    /// True if the tick produced no output at all
    pub fn is_quiet(&self) -> bool {
        self.notifications.is_empty() && self.dropped == 0
    }

    fn record(&mut self, notification: Notification) {
        if self.notifications.push(notification).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

/// Owns the board peripherals and the loop state
///
/// Generic over the pin, touch sensor and console halves so the same
/// loop runs on hardware and against mocks.
pub struct PollLoop<P, T, R, W> {
    buttons: [Button<P>; 2],
    touch: T,
    rx: R,
    tx: W,
    lines: LineAssembler,
    mode: ConsoleMode,
    echo_prefix: String<MAX_PREFIX_LEN>,
    interval_ms: u32,
    ticks: u32,
}

impl<P, T, R, W> PollLoop<P, T, R, W>
where
    P: InputPin,
    T: TouchSource,
    R: UartRx,
    W: UartTx,
{
    /// Create the loop
    ///
    /// Button polarity, console mode, echo prefix and interval come from
    /// `config`; pins must already be configured as inputs.
    pub fn new(
        button1: P,
        button2: P,
        touch: T,
        rx: R,
        tx: W,
        config: &BoardConfig,
    ) -> Self {
        Self {
            buttons: [
                Button::new(ButtonId::Button1, button1, config.buttons.button1.inverted),
                Button::new(ButtonId::Button2, button2, config.buttons.button2.inverted),
            ],
            touch,
            rx,
            tx,
            lines: LineAssembler::new(),
            mode: config.console.mode,
            echo_prefix: config.console.echo_prefix.clone(),
            interval_ms: config.timing.interval_ms,
            ticks: 0,
        }
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u32 {
        self.ticks
    }

    /// Sleep between ticks, in milliseconds
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Whether each button is currently recorded as pressed
    pub fn buttons_pressed(&self) -> [bool; 2] {
        [
            self.buttons[0].state().is_pressed(),
            self.buttons[1].state().is_pressed(),
        ]
    }

    /// Console bytes received but not yet terminated
    pub fn pending_input(&self) -> &[u8] {
        self.lines.pending()
    }

    /// Run one tick without sleeping
    pub fn tick(&mut self) -> Result<TickReport, LoopError<R::Error, W::Error>> {
        let mut report = TickReport::default();

        for i in 0..self.buttons.len() {
            let id = self.buttons[i].id();
            if let Some(event) = self.buttons[i].poll() {
                let notification = match event {
                    ButtonEvent::Pressed => Notification::pressed(id),
                    ButtonEvent::Released => Notification::released(id),
                };
                self.emit(notification, &mut report)?;
            }
        }

        if let Some(point) = self.touch.touch_point().map_err(LoopError::Touch)? {
            self.emit(Notification::Touch(point), &mut report)?;
        }

        if self.rx.bytes_available().map_err(LoopError::ConsoleRead)? {
            match self.mode {
                ConsoleMode::NonBlocking => self.drain_console(&mut report)?,
                ConsoleMode::Blocking => self.read_console_line(&mut report)?,
            }
        }

        self.ticks = self.ticks.wrapping_add(1);
        Ok(report)
    }

    /// Tick forever, sleeping the configured interval after each tick
    ///
    /// `on_tick` sees every report before the sleep. Only returns when a
    /// peripheral fails.
    pub async fn run<D, F>(
        &mut self,
        delay: &mut D,
        mut on_tick: F,
    ) -> LoopError<R::Error, W::Error>
    where
        D: DelayNs,
        F: FnMut(&TickReport),
    {
        loop {
            match self.tick() {
                Ok(report) => on_tick(&report),
                Err(e) => return e,
            }
            delay.delay_ms(self.interval_ms).await;
        }
    }

    /// Consume whatever is buffered; echo every completed line
    fn drain_console(
        &mut self,
        report: &mut TickReport,
    ) -> Result<(), LoopError<R::Error, W::Error>> {
        let mut chunk = [0u8; READ_CHUNK];
        let mut consumed = 0;

        while consumed < MAX_DRAIN_PER_TICK {
            let n = self
                .rx
                .read_available(&mut chunk)
                .map_err(LoopError::ConsoleRead)?;
            consumed += n;

            for &byte in &chunk[..n] {
                if let Some(line) = self.lines.push(byte) {
                    self.emit(Notification::Echo(line), report)?;
                }
            }

            if n < chunk.len() || !self.rx.bytes_available().map_err(LoopError::ConsoleRead)? {
                break;
            }
        }

        Ok(())
    }

    /// Block until one line is complete, then echo it
    ///
    /// Reads byte by byte so nothing past the terminator is consumed. A
    /// lone `\n` left over from a `\r\n` pair does not start a new wait.
    fn read_console_line(
        &mut self,
        report: &mut TickReport,
    ) -> Result<(), LoopError<R::Error, W::Error>> {
        loop {
            let byte = self.rx.read_byte().map_err(LoopError::ConsoleRead)?;
            if let Some(line) = self.lines.push(byte) {
                return self.emit(Notification::Echo(line), report);
            }
            if self.lines.pending().is_empty()
                && !self.rx.bytes_available().map_err(LoopError::ConsoleRead)?
            {
                return Ok(());
            }
        }
    }

    /// Write a notification to the console and record it
    fn emit(
        &mut self,
        notification: Notification,
        report: &mut TickReport,
    ) -> Result<(), LoopError<R::Error, W::Error>> {
        let mut message: String<MAX_MESSAGE_LEN> = String::new();
        // Cannot overflow: MAX_MESSAGE_LEN covers the longest prefix and line
        let _ = write!(message, "{}\r\n", notification.display(&self.echo_prefix));

        self.tx
            .write_blocking(message.as_bytes())
            .map_err(LoopError::ConsoleWrite)?;
        report.record(notification);
        Ok(())
    }
}
