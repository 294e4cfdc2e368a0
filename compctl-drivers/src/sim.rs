//! Simulated companion controller for driver tests
//!
//! Backs the whole 16-bit register space with memory, records every
//! transaction in order, and can be told to NACK.

use compctl_hal::{I2cBus, I2cBusError};
use embedded_hal::delay::DelayNs;

/// A recorded bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Plain write (pointer + payload)
    Write {
        address: u8,
        bytes: Vec<u8>,
        acked: bool,
    },
    /// Pointer write followed by a repeated-start read
    WriteRead {
        address: u8,
        pointer: Vec<u8>,
        len: usize,
        acked: bool,
    },
}

impl Transaction {
    /// Register the transaction targeted
    pub fn register(&self) -> u16 {
        let ptr = match self {
            Transaction::Write { bytes, .. } => bytes,
            Transaction::WriteRead { pointer, .. } => pointer,
        };
        u16::from_be_bytes([ptr[0], ptr[1]])
    }

    /// Payload of a write, without the pointer
    pub fn payload(&self) -> &[u8] {
        match self {
            Transaction::Write { bytes, .. } => &bytes[2..],
            Transaction::WriteRead { .. } => &[],
        }
    }
}

pub struct SimBus {
    pub memory: Vec<u8>,
    pub log: Vec<Transaction>,
    fail_next: usize,
    fail_registers: Vec<u16>,
    pointer: u16,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            memory: vec![0; 0x1_0000 + 4096],
            log: Vec::new(),
            fail_next: 0,
            fail_registers: Vec::new(),
            pointer: 0,
        }
    }

    /// NACK the next `n` transactions
    pub fn fail_next(&mut self, n: usize) {
        self.fail_next = n;
    }

    /// NACK every transaction addressed to `register`
    pub fn fail_at(&mut self, register: u16) {
        self.fail_registers.push(register);
    }

    fn should_fail(&mut self, register: u16) -> bool {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return true;
        }
        self.fail_registers.contains(&register)
    }
}

impl I2cBus for SimBus {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        let register = u16::from_be_bytes([data[0], data[1]]);
        let fail = self.should_fail(register);
        self.log.push(Transaction::Write {
            address,
            bytes: data.to_vec(),
            acked: !fail,
        });
        if fail {
            return Err(I2cBusError::Nack);
        }
        let start = register as usize;
        self.memory[start..start + data.len() - 2].copy_from_slice(&data[2..]);
        self.pointer = register;
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let start = self.pointer as usize;
        buf.copy_from_slice(&self.memory[start..start + buf.len()]);
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        let register = u16::from_be_bytes([write_data[0], write_data[1]]);
        let fail = self.should_fail(register);
        self.log.push(Transaction::WriteRead {
            address,
            pointer: write_data.to_vec(),
            len: read_buf.len(),
            acked: !fail,
        });
        if fail {
            // Simulate a device that clocked out garbage before the NACK
            read_buf.fill(0xFF);
            return Err(I2cBusError::Nack);
        }
        self.pointer = register;
        self.read(address, read_buf)
    }
}

/// Delay that records requests instead of sleeping
#[derive(Default)]
pub struct RecordingDelay {
    pub calls: Vec<u32>,
    /// Invoked after each delay with the number of delays so far
    pub on_delay: Option<Box<dyn FnMut(usize)>>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
        let n = self.calls.len();
        if let Some(hook) = self.on_delay.as_mut() {
            hook(n);
        }
    }
}
