//! DRV8830 register map and encoding constants.
//!
//! The CONTROL register packs the bridge direction into bits 1..0 and the
//! output voltage code (VSET) into bits 7..2.

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Right wheel driver (A1 open, A0 open).
pub const ADDRESS_RIGHT: u8 = 0x64;

/// Left wheel driver (A1 open, A0 high).
pub const ADDRESS_LEFT: u8 = 0x65;

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// CONTROL register: `VSET[5:0] << 2 | IN2 << 1 | IN1`.
pub const CONTROL: u8 = 0x00;

/// FAULT register (read) / CLEAR bit (write).
pub const FAULT: u8 = 0x01;

// ---------------------------------------------------------------------------
// FAULT bits
// ---------------------------------------------------------------------------

pub const FAULT_FAULT: u8 = 1 << 0;
pub const FAULT_OCP: u8 = 1 << 1;
pub const FAULT_UVLO: u8 = 1 << 2;
pub const FAULT_OTS: u8 = 1 << 3;
pub const FAULT_ILIMIT: u8 = 1 << 4;

/// Writing this bit clears the latched fault flags.
pub const FAULT_CLEAR: u8 = 1 << 7;

// ---------------------------------------------------------------------------
// Voltage encoding
// ---------------------------------------------------------------------------

/// Largest accepted voltage magnitude, in percent.
pub const VOLTAGE_MAX: i32 = 100;

/// VSET code reached at [`VOLTAGE_MAX`].
///
/// The 6-bit field spans 0.48–5.06 V; 37 is about 3 V, the battery
/// ceiling on this robot. Codes up to 0x3F are never produced.
pub const VSET_MAX: i32 = 37;

/// Bit offset of VSET within CONTROL.
pub const VSET_SHIFT: u8 = 2;
