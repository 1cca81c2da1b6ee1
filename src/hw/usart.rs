// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! USART3 carries both directions of the ST-LINK virtual COM port: sensor frames come in on RX
//! and a plain-text status console goes out on TX.
//!
//! - [`Usart`] - blocking TX with a few printing helpers.
//! - [`LinkRx`] - interrupt-driven RX feeding an [`RxRing`].
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Instance, Rx, Tx},
};

use crate::protocol::RxRing;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new(tx: Tx<U>) -> Self {
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// Receive side of USART3.
pub struct LinkRx {
    rx: Rx<pac::USART3>,
}

impl LinkRx {
    /// Take the RX half and enable the RXNE interrupt.
    ///
    /// The caller still has to unmask `USART3` in the NVIC.
    pub fn new(rx: Rx<pac::USART3>) -> Self {
        let usart = unsafe { &*pac::USART3::ptr() };
        usart.cr1.modify(|_, w| w.rxneie().set_bit());
        Self { rx }
    }

    /// Move every byte the peripheral holds into `ring`. Call from the `USART3` handler.
    ///
    /// Line errors drop the offending byte; the frame decoder resynchronizes on its own.
    pub fn service<const N: usize>(&mut self, ring: &RxRing<N>) -> usize {
        let mut moved = 0;
        while let Ok(b) = self.rx.read() {
            ring.push(b);
            moved += 1;
        }

        // Clear any latched error so RXNE can fire again
        let usart = unsafe { &*pac::USART3::ptr() };
        usart.icr.write(|w| {
            w.orecf()
                .set_bit()
                .fecf()
                .set_bit()
                .ncf()
                .set_bit()
                .pecf()
                .set_bit()
        });

        moved
    }
}
