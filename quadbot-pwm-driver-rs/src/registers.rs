//! Register map and device constants for the PCA9685.
//!
//! Each output channel owns a 4-byte register block starting at
//! `LED0_ON_L + 4 * channel`, laid out as `[on_l, on_h, off_l, off_h]`.
//! With MODE1 auto-increment enabled the whole block is written in one
//! I2C transaction.

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// Mode register 1 (sleep, auto-increment, restart).
pub const MODE1: u8 = 0x00;

/// Oscillator prescale register. Only writable while MODE1 SLEEP is set.
pub const PRESCALE: u8 = 0xFE;

/// First register of channel 0's on/off tick block.
pub const LED0_ON_L: u8 = 0x06;

/// Size in bytes of one channel's register block.
pub const CHANNEL_STRIDE: u8 = 4;

// ---------------------------------------------------------------------------
// MODE1 bits
// ---------------------------------------------------------------------------

/// Clears the RESTART bit (bit 7) while preserving the rest of MODE1.
pub const MODE1_RESTART_CLEAR_MASK: u8 = 0x7F;

/// SLEEP bit: oscillator off, prescale writable.
pub const MODE1_SLEEP: u8 = 0x10;

/// RESTART | AI (auto-increment) | ALLCALL, written to wake the oscillator.
pub const MODE1_WAKE: u8 = 0xA1;

// ---------------------------------------------------------------------------
// Device constants
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address of the PCA9685 on the robot board.
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Number of PWM output channels.
pub const CHANNEL_COUNT: u8 = 16;

/// Internal oscillator frequency in Hz.
pub const OSCILLATOR_HZ: u32 = 25_000_000;

/// Counter resolution: one period is split into this many ticks.
pub const TICKS_PER_PERIOD: u32 = 4096;

/// Largest on/off tick value.
pub const TICK_MAX: u16 = 4095;

/// Servo refresh frequency used for every channel.
pub const PWM_FREQUENCY_HZ: u32 = 50;

/// Length of one PWM period at [`PWM_FREQUENCY_HZ`], in microseconds.
pub const PWM_PERIOD_US: u32 = 20_000;

/// Settle time after writing the prescale before the oscillator restarts.
pub const PRESCALE_SETTLE_US: u32 = 5_000;

/// Smallest prescale value the part accepts.
pub const PRESCALE_MIN: u32 = 3;

/// Largest prescale value the part accepts.
pub const PRESCALE_MAX: u32 = 255;
