/// RGB LED outputs on PCA9685 channels 0–2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl LedColor {
    /// Look up an LED by channel index. Returns `None` outside `0..=2`.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(LedColor::Red),
            1 => Some(LedColor::Green),
            2 => Some(LedColor::Blue),
            _ => None,
        }
    }

    #[inline]
    pub fn channel(self) -> u8 {
        self as u8
    }
}

/// Off tick for an LED drive level in percent (clamped to `0..=100`).
///
/// 100 % maps to 4050 ticks (`percent * 81 / 2`).
pub fn led_ticks(percent: i32) -> u16 {
    (percent.clamp(0, 100) * 81 / 2) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_scaling() {
        assert_eq!(led_ticks(0), 0);
        assert_eq!(led_ticks(1), 40);
        assert_eq!(led_ticks(50), 2025);
        assert_eq!(led_ticks(100), 4050);
        assert_eq!(led_ticks(-5), 0);
        assert_eq!(led_ticks(180), 4050);
    }

    #[test]
    fn led_channels() {
        assert_eq!(LedColor::from_index(1).map(LedColor::channel), Some(1));
        assert_eq!(LedColor::from_index(3), None);
    }
}
