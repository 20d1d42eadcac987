//! Host-side fake: a register-file I2C bus.

use std::collections::BTreeMap;
use std::vec::Vec;

use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// One I2C transaction as seen on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub address: u8,
    pub written: Vec<u8>,
    pub read_len: usize,
}

/// I2C bus that emulates auto-incrementing register files, one per address.
#[derive(Default)]
pub struct FakeBus {
    pub devices: BTreeMap<u8, [u8; 256]>,
    pub transfers: Vec<Transfer>,
    /// Fail every transaction once this many have succeeded.
    pub fail_after: Option<usize>,
    pointers: BTreeMap<u8, u8>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, address: u8, register: u8) -> u8 {
        self.devices.get(&address).map_or(0, |regs| regs[register as usize])
    }

    /// Transactions that only wrote (register writes), in bus order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.transfers
            .iter()
            .filter(|t| t.read_len == 0)
            .map(|t| t.written.clone())
            .collect()
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if let Some(limit) = self.fail_after {
            if self.transfers.len() >= limit {
                return Err(ErrorKind::Other);
            }
        }

        let regs = self.devices.entry(address).or_insert([0u8; 256]);
        let pointer = self.pointers.entry(address).or_insert(0);
        let mut transfer = Transfer {
            address,
            written: Vec::new(),
            read_len: 0,
        };

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    transfer.written.extend_from_slice(bytes);
                    if let Some((&reg, data)) = bytes.split_first() {
                        *pointer = reg;
                        for &b in data {
                            regs[*pointer as usize] = b;
                            *pointer = pointer.wrapping_add(1);
                        }
                    }
                }
                Operation::Read(buf) => {
                    transfer.read_len += buf.len();
                    for b in buf.iter_mut() {
                        *b = regs[*pointer as usize];
                        *pointer = pointer.wrapping_add(1);
                    }
                }
            }
        }

        self.transfers.push(transfer);
        Ok(())
    }
}
