//! Internal PIO interrupt bindings used by the matrix driver.

#![cfg(feature = "pico1")]

::embassy_rp::bind_interrupts! {
    pub struct Pio0Irqs {
        PIO0_IRQ_0 => ::embassy_rp::pio::InterruptHandler<::embassy_rp::peripherals::PIO0>;
    }
}
