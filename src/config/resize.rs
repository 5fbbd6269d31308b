use std::time::Duration;

use thiserror::Error;

use crate::domain::core::Size;

/// How the controller waits for a window to apply a resize
///
/// Many applications handle `WM_SIZE` on a render or game thread, so the
/// client size read right after the call can still be the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStrategy {
    /// Sleep once for a fixed delay
    Fixed(Duration),
    /// Re-read the client size every `interval` until it reaches the target,
    /// or until it has moved off the pre-resize size and two consecutive
    /// reads agree; gives up after `timeout`
    Poll { interval: Duration, timeout: Duration },
}

impl SettleStrategy {
    /// Longest time a single settle can block
    pub fn max_wait(&self) -> Duration {
        match *self {
            SettleStrategy::Fixed(delay) => delay,
            SettleStrategy::Poll { timeout, .. } => timeout,
        }
    }
}

/// Parameters of a resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeConfig {
    /// Client-area size every resized window should end up with
    pub target: Size,
    /// Pause after restoring a maximized or minimized window
    pub restore_settle: Duration,
    /// Wait after each placement call, before verifying
    pub settle: SettleStrategy,
}

impl ResizeConfig {
    pub const DEFAULT_TARGET: Size = Size { w: 1920, h: 1080 };
    pub const MAX_DIMENSION: i32 = 16384;
    pub const RESTORE_SETTLE: Duration = Duration::from_millis(100);
    pub const APPLY_SETTLE: Duration = Duration::from_millis(150);
    pub const POLL_INTERVAL: Duration = Duration::from_millis(25);
    pub const MAX_SETTLE: Duration = Duration::from_secs(5);

    /// Default timings with a custom target size
    pub fn new(target: Size) -> Result<Self, ConfigError> {
        let config = Self {
            target,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Settles by polling instead of a single fixed sleep, bounded by the
    /// current settle delay
    pub fn with_polling(mut self) -> Self {
        self.settle = SettleStrategy::Poll {
            interval: Self::POLL_INTERVAL,
            timeout: self.settle.max_wait(),
        };
        self
    }

    /// Same delay after restore and after each placement
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.restore_settle = delay;
        self.settle = match self.settle {
            SettleStrategy::Fixed(_) => SettleStrategy::Fixed(delay),
            SettleStrategy::Poll { interval, .. } => SettleStrategy::Poll {
                interval,
                timeout: delay,
            },
        };
        self
    }

    /// No waiting at all; for backends that apply resizes synchronously
    pub fn immediate(target: Size) -> Self {
        Self {
            target,
            restore_settle: Duration::ZERO,
            settle: SettleStrategy::Fixed(Duration::ZERO),
        }
    }

    /// Checks that each side of a client size is in `1..=MAX_DIMENSION`
    pub fn validate_target(target: Size) -> Result<(), ConfigError> {
        let Size { w, h } = target;
        if w <= 0 || h <= 0 || w > Self::MAX_DIMENSION || h > Self::MAX_DIMENSION {
            return Err(ConfigError::InvalidTarget {
                width: w,
                height: h,
                max: Self::MAX_DIMENSION,
            });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_target(self.target)?;

        if self.restore_settle > Self::MAX_SETTLE || self.settle.max_wait() > Self::MAX_SETTLE {
            return Err(ConfigError::InvalidSettle {
                max_ms: Self::MAX_SETTLE.as_millis() as u64,
            });
        }

        if let SettleStrategy::Poll { interval, timeout } = self.settle {
            if interval.is_zero() && !timeout.is_zero() {
                return Err(ConfigError::ZeroPollInterval);
            }
        }

        Ok(())
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            target: Self::DEFAULT_TARGET,
            restore_settle: Self::RESTORE_SETTLE,
            settle: SettleStrategy::Fixed(Self::APPLY_SETTLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("target size {width}x{height} is invalid (each side must be 1..={max})")]
    InvalidTarget { width: i32, height: i32, max: i32 },
    #[error("settle delays must not exceed {max_ms}ms")]
    InvalidSettle { max_ms: u64 },
    #[error("poll interval must be non-zero")]
    ZeroPollInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_1080p() {
        let config = ResizeConfig::default();
        assert_eq!(config.target, Size::new(1920, 1080));
        assert_eq!(config.restore_settle, Duration::from_millis(100));
        assert_eq!(config.settle, SettleStrategy::Fixed(Duration::from_millis(150)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_target_is_validated() {
        assert!(ResizeConfig::new(Size::new(2560, 1440)).is_ok());
        assert_eq!(
            ResizeConfig::new(Size::new(0, 1080)),
            Err(ConfigError::InvalidTarget {
                width: 0,
                height: 1080,
                max: ResizeConfig::MAX_DIMENSION
            })
        );
        assert!(matches!(
            ResizeConfig::new(Size::new(1920, 20000)),
            Err(ConfigError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn settle_delay_bounds() {
        let slow = ResizeConfig::default().with_settle_delay(Duration::from_secs(10));
        assert!(matches!(slow.validate(), Err(ConfigError::InvalidSettle { .. })));

        let fast = ResizeConfig::default().with_settle_delay(Duration::from_millis(40));
        assert_eq!(fast.restore_settle, Duration::from_millis(40));
        assert_eq!(fast.settle, SettleStrategy::Fixed(Duration::from_millis(40)));
    }

    #[test]
    fn polling_keeps_delay_as_timeout() {
        let config = ResizeConfig::default().with_polling();
        assert_eq!(
            config.settle,
            SettleStrategy::Poll {
                interval: ResizeConfig::POLL_INTERVAL,
                timeout: ResizeConfig::APPLY_SETTLE,
            }
        );
        assert!(config.validate().is_ok());

        let zero_interval = ResizeConfig {
            settle: SettleStrategy::Poll {
                interval: Duration::ZERO,
                timeout: Duration::from_millis(100),
            },
            ..ResizeConfig::default()
        };
        assert_eq!(zero_interval.validate(), Err(ConfigError::ZeroPollInterval));
    }
}
