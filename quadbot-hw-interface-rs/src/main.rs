//! quadbot-hw-interface
//!
//! Firmware for the quadruped on a Raspberry Pi Pico 2. Wires the three
//! library crates onto one shared I2C bus and plays a demonstration
//! routine:
//!
//! 1. `main` brings up the PCA9685 through `MotionContext::connect()`.
//! 2. The motion task walks through [`ROUTINE`], one command at a time.
//!    Postures and gaits go through the gait sequencer; wheel commands go
//!    straight to the DRV8830 drivers.
//! 3. When the routine ends both wheels are put in standby and the robot
//!    sits down.

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use motor_driver::{DualMotorDriver, MotorChannel};
use pwm_driver::DEFAULT_ADDRESS as PWM_ADDRESS;
use quadbot::motion::{Gait, LedColor, MotionContext};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Shared I2C0 bus. The PCA9685 and both DRV8830s hang off it.
static I2C_BUS: StaticCell<
    Mutex<CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>,
> = StaticCell::new();

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

type BusDevice = I2cDevice<
    'static,
    CriticalSectionRawMutex,
    I2c<'static, I2C0, i2c::Async>,
>;

type Robot = MotionContext<BusDevice, Delay>;
type Wheels = DualMotorDriver<BusDevice>;

// ---------------------------------------------------------------------------
// Routine
// ---------------------------------------------------------------------------

/// One step of the demonstration routine.
#[derive(Clone, Copy, Format)]
enum Command {
    /// Run a posture or gait with an explicit stride and duration.
    Move(Gait, i32, f32),
    /// Run a gait several times with its defaults.
    Repeat(Gait, u32),
    /// Set the waist baseline for the following walks.
    Waist(i32),
    Led(LedColor, i32),
    /// Drive both wheels (right %, left %) for a number of milliseconds,
    /// then brake.
    Drive(i32, i32, u64),
    Pause(u64),
}

const ROUTINE: &[Command] = &[
    Command::Led(LedColor::Green, 100),
    Command::Move(Gait::StandUp, 0, 0.0),
    Command::Move(Gait::Greet, 0, 1.5),
    Command::Pause(500),
    Command::Move(Gait::StandUp, 0, 1.0),
    Command::Led(LedColor::Green, 0),
    Command::Led(LedColor::Blue, 100),
    Command::Repeat(Gait::WalkForward, 3),
    Command::Waist(20),
    Command::Move(Gait::WalkRight, 25, 2.0),
    Command::Move(Gait::WalkLeft, 25, 2.0),
    Command::Waist(15),
    Command::Repeat(Gait::WalkReverse, 2),
    Command::Move(Gait::StandUp, 0, 0.0),
    Command::Led(LedColor::Blue, 0),
    Command::Led(LedColor::Red, 60),
    Command::Drive(50, 50, 1000),
    Command::Drive(-40, 40, 600),
    Command::Led(LedColor::Red, 0),
];

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Plays [`ROUTINE`] once, then parks the robot.
///
/// A failed command is logged and skipped; the routine carries on with the
/// next one.
#[embassy_executor::task]
async fn motion_task(mut robot: Robot, mut wheels: Wheels) {
    info!("Motion task started");

    for (index, &command) in ROUTINE.iter().enumerate() {
        debug!("Command {}: {}", index, command);

        let ok = match command {
            Command::Move(gait, stride, seconds) => robot.perform(gait, stride, seconds).await.is_ok(),
            Command::Repeat(gait, times) => robot.repeat(gait, times).await.is_ok(),
            Command::Waist(degree) => {
                robot.set_waist_baseline(degree);
                true
            }
            Command::Led(color, percent) => robot.set_led(color, percent).await.is_ok(),
            Command::Drive(right, left, ms) => drive_for(&mut wheels, right, left, ms).await,
            Command::Pause(ms) => {
                Timer::after(Duration::from_millis(ms)).await;
                true
            }
        };

        if !ok {
            error!("Command {} failed: {}", index, command);
        }
    }

    if wheels.stop_all().await.is_err() {
        warn!("Failed to stop wheels");
    }
    if robot.sit_down(0.0).await.is_err() {
        warn!("Failed to sit down");
    }

    info!("Routine finished, joints: {}", robot.joints());
}

/// Drive both wheels for `ms`, brake, and report any latched fault.
async fn drive_for(wheels: &mut Wheels, right: i32, left: i32, ms: u64) -> bool {
    if wheels.drive_motor(MotorChannel::Right, right).await.is_err()
        || wheels.drive_motor(MotorChannel::Left, left).await.is_err()
    {
        return false;
    }

    Timer::after(Duration::from_millis(ms)).await;

    let braked = wheels.brake(MotorChannel::Right).await.is_ok()
        && wheels.brake(MotorChannel::Left).await.is_ok();

    for motor in [MotorChannel::Right, MotorChannel::Left] {
        match wheels.read_fault(motor).await {
            Ok(fault) if fault.fault() => {
                warn!("Motor {} fault: {}", motor, fault);
                let _ = wheels.clear_fault(motor).await;
            }
            Ok(_) => {}
            Err(_) => warn!("Could not read motor {} fault register", motor),
        }
    }

    braked
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("quadbot-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // I2C_SDA → GP20  (p.PIN_20)
    // I2C_SCL → GP21  (p.PIN_21)
    // ———————————————————————————————————————————————————————————————————————

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let i2c_bus = I2C_BUS.init(Mutex::new(i2c));

    // Each driver gets its own I2cDevice; transactions are serialised on
    // the mutex.
    let i2c_pwm = I2cDevice::new(i2c_bus);
    let i2c_motors = I2cDevice::new(i2c_bus);

    let robot = match MotionContext::connect(i2c_pwm, PWM_ADDRESS, Delay).await {
        Ok(robot) => robot,
        Err(e) => {
            error!("PCA9685 bring-up failed: {}", Debug2Format(&e));
            return;
        }
    };

    let wheels = DualMotorDriver::new(i2c_motors);

    spawner.spawn(motion_task(robot, wheels)).unwrap();

    info!("Motion task spawned");
}
