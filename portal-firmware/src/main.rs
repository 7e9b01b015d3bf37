//! Portal - Button, Touchscreen and Serial Echo Firmware
//!
//! Main firmware binary for RP2040-based boards with two buttons, a
//! 4-wire resistive touchscreen and a UART console.
//!
//! Everything runs in the main task: one polling loop that checks the
//! buttons, then the touchscreen, then the console, then sleeps.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use portal_core::config::PinConfig;
use portal_core::poll::{PollLoop, TickReport};
use portal_drivers::touch::ResistiveTouchscreen;
use portal_hal::UartConfig;
use portal_hal_rp2040::uart::to_rp_config;
use portal_hal_rp2040::{ButtonInput, ConsoleRx, ConsoleTx, PinBank, Rp2040Panel};

mod board;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Portal firmware starting...");

    let p = embassy_rp::init(Default::default());
    let (mut bank, pins, periph) = PinBank::from_peripherals(p);
    info!("Peripherals initialized");

    let config = board::load_config();
    board::log_config(&config);

    // Buttons come from board.toml
    let button1 = take_button(&mut bank, &config.buttons.button1);
    let button2 = take_button(&mut bank, &config.buttons.button2);
    info!("Buttons initialized");

    // Console on UART0 (GPIO0 TX, GPIO1 RX)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart_config = to_rp_config(&UartConfig::with_baudrate(config.console.baudrate));
    let uart = Uart::new_blocking(periph.uart0, pins.console_tx, pins.console_rx, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART console initialized");

    // Touch panel: X-left GPIO22, X-right/Y-down/Y-up on ADC0-2
    let adc = Adc::new_blocking(periph.adc, adc::Config::default());
    let panel = Rp2040Panel::new(
        adc,
        pins.touch_x_left.into(),
        pins.touch_x_right,
        pins.touch_y_down,
        pins.touch_y_up,
    );
    let touch = ResistiveTouchscreen::new(panel, config.touch);
    info!("Touchscreen initialized");

    let mut poll = PollLoop::new(
        button1,
        button2,
        touch,
        ConsoleRx::new(rx),
        ConsoleTx::new(tx),
        &config,
    );

    info!("Polling every {}ms", poll.interval_ms());

    let err = poll.run(&mut embassy_time::Delay, log_report).await;
    defmt::panic!("Polling loop stopped: {}", err);
}

/// Take a button pin from the bank and configure it as an input
fn take_button(bank: &mut PinBank, pin: &PinConfig) -> ButtonInput<'static> {
    match bank.take(pin.pin) {
        Ok(gpio) => ButtonInput::new(gpio, board::button_pull(pin)),
        Err(e) => defmt::panic!("Button pin gpio{} unavailable: {}", pin.pin, e),
    }
}

/// Mirror each tick's console output to the defmt log
fn log_report(report: &TickReport) {
    for notification in &report.notifications {
        info!("{}", notification);
    }
    if report.dropped > 0 {
        warn!("{} notifications not logged this tick", report.dropped);
    }
    trace!("Tick done");
}
