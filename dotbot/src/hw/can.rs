// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Controller Area Network (CAN) transport.
//!
//! - `CanBus` wraps a HAL `can::Can` instance in `bxcan::Can` and configures it for the robot.
//! - `split` hands the receive half to the FIFO0 interrupt and keeps the transmit half in the main
//!   loop.
//!
//! One CAN data frame carries one packet. Commands are accepted on [`COMMAND_ID`]; beacons are
//! sent on [`BEACON_ID`]. Nothing here blocks: a full mailbox is reported as an error and the
//! frame is dropped.

use core::fmt;

use bxcan::{self, Data, Frame, Id, StandardId};
use stm32f7xx_hal::can as hal_can;

use crate::board::Transport;
use crate::protocol::Packet;

/// Standard identifier carrying inbound command packets.
pub const COMMAND_ID: u16 = 0x100;

/// Standard identifier used for outbound beacons.
pub const BEACON_ID: u16 = 0x101;

/// Bit timing for 500 kbit/s from a 16 MHz APB1 clock (BRP = 2, 16 tq, sample point 87.5 %).
pub const BTR_500K_16MHZ: u32 = 0x001C_0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Payload longer than one classic CAN frame.
    PayloadTooLong(usize),
    /// All transmit mailboxes are busy with frames of equal or higher priority.
    MailboxFull,
    /// A frame was lost because the receive FIFO overflowed.
    Overrun,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PayloadTooLong(len) => write!(f, "payload of {} bytes exceeds one frame", len),
            Error::MailboxFull => f.write_str("transmit mailboxes full"),
            Error::Overrun => f.write_str("receive FIFO overrun"),
        }
    }
}

impl From<bxcan::OverrunError> for Error {
    fn from(_: bxcan::OverrunError) -> Self {
        Error::Overrun
    }
}

/// Wrapper around a bxcan CAN instance built from a HAL CAN peripheral.
pub struct CanBus<I>
where
    hal_can::Can<I>: bxcan::Instance,
{
    can: bxcan::Can<hal_can::Can<I>>,
}

impl<I> CanBus<I>
where
    hal_can::Can<I>: bxcan::Instance,
{
    /// Create and enable a bxcan instance from a HAL CAN peripheral.
    ///
    /// * `hal_can` – the HAL CAN wrapper
    /// * `btr` – value for the CAN_BTR register (bit timing), e.g. [`BTR_500K_16MHZ`].
    pub fn new(hal_can: hal_can::Can<I>, btr: u32) -> Self {
        let can = bxcan::Can::builder(hal_can)
            .set_bit_timing(btr)
            .set_automatic_retransmit(false)
            .enable();

        Self { can }
    }

    /// Raise the FIFO0 interrupt whenever a frame is waiting.
    pub fn listen_fifo0(&mut self) {
        self.can
            .enable_interrupt(bxcan::Interrupt::Fifo0MessagePending);
    }

    /// Split into the transmit half (main loop) and the FIFO0 receive half (interrupt).
    pub fn split(self) -> (CanTx<I>, CanRx<I>) {
        let (tx, rx0, _rx1) = self.can.split();
        (
            CanTx {
                tx,
                id: StandardId::new(BEACON_ID).unwrap_or(StandardId::ZERO),
            },
            CanRx { rx: rx0 },
        )
    }
}

/// Filter setup for the filter-owning instance (CAN1 on STM32F7).
impl<I> CanBus<I>
where
    hal_can::Can<I>: bxcan::Instance + bxcan::FilterOwner,
{
    /// Accept every frame into FIFO0; the receive half selects commands by identifier.
    pub fn accept_all(&mut self) {
        self.can
            .modify_filters()
            .enable_bank(0, bxcan::Fifo::Fifo0, bxcan::filter::Mask32::accept_all());
    }
}

/// Transmit half. Implements [`Transport`] for beacons.
pub struct CanTx<I>
where
    hal_can::Can<I>: bxcan::Instance,
{
    tx: bxcan::Tx<hal_can::Can<I>>,
    id: StandardId,
}

impl<I> Transport for CanTx<I>
where
    hal_can::Can<I>: bxcan::Instance,
{
    type Error = Error;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let data = Data::new(bytes).ok_or(Error::PayloadTooLong(bytes.len()))?;
        let frame = Frame::new_data(self.id, data);
        match self.tx.transmit(&frame) {
            Ok(_) => Ok(()),
            Err(nb::Error::WouldBlock) => Err(Error::MailboxFull),
            Err(nb::Error::Other(never)) => match never {},
        }
    }
}

/// FIFO0 receive half.
pub struct CanRx<I>
where
    hal_can::Can<I>: bxcan::Instance,
{
    rx: bxcan::Rx0<hal_can::Can<I>>,
}

impl<I> CanRx<I>
where
    hal_can::Can<I>: bxcan::Instance,
{
    /// Pop frames until a command packet turns up or the FIFO is empty.
    ///
    /// Frames on other identifiers and remote frames are discarded.
    pub fn receive_packet(&mut self) -> Result<Option<Packet>, Error> {
        loop {
            let frame = match self.rx.receive() {
                Ok(frame) => frame,
                Err(nb::Error::WouldBlock) => return Ok(None),
                Err(nb::Error::Other(e)) => return Err(e.into()),
            };

            if !is_command(frame.id()) {
                continue;
            }
            if let Some(data) = frame.data() {
                // A frame holds at most 8 bytes, always within the packet capacity.
                if let Ok(packet) = Packet::from_slice(data) {
                    return Ok(Some(packet));
                }
            }
        }
    }
}

fn is_command(id: Id) -> bool {
    matches!(id, Id::Standard(id) if id.as_raw() == COMMAND_ID)
}
