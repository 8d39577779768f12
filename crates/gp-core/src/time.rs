//! Time-of-day model.
//!
//! The environment tracks a single wraparound minute counter: one
//! environment tick advances it by one minute, and it wraps at
//! [`MINUTES_PER_DAY`].  The traffic forecast keys its daily pattern off this
//! counter, and delivery windows are expressed in the same
//! minutes-from-midnight unit.

use std::fmt;

use crate::{CoreError, CoreResult};

pub const MINUTES_PER_DAY: u32 = 1_440;

/// Minutes since midnight, wrapping at 24 h.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayClock {
    minute: u32,
}

impl DayClock {
    pub const MIDNIGHT: DayClock = DayClock { minute: 0 };

    /// Clock at `minute` (taken modulo one day).
    pub fn at(minute: u32) -> Self {
        Self { minute: minute % MINUTES_PER_DAY }
    }

    /// Clock at `hh:mm`.
    pub fn at_hm(hour: u32, minute: u32) -> Self {
        Self::at(hour * 60 + minute)
    }

    #[inline]
    pub fn minute(self) -> u32 {
        self.minute
    }

    /// Advance by one minute.
    #[inline]
    pub fn advance(&mut self) {
        self.minute = (self.minute + 1) % MINUTES_PER_DAY;
    }

    /// The time `minutes` from now, wrapping past midnight.
    #[inline]
    pub fn offset(self, minutes: u32) -> DayClock {
        DayClock::at(self.minute + minutes % MINUTES_PER_DAY)
    }

    pub fn hour_minute(self) -> (u32, u32) {
        (self.minute / 60, self.minute % 60)
    }

    /// Parse an `HH:MM` string into minutes from midnight.
    pub fn parse_hm(s: &str) -> CoreResult<u32> {
        let invalid = || CoreError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let h: u32 = h.parse().map_err(|_| invalid())?;
        let m: u32 = m.parse().map_err(|_| invalid())?;
        if h >= 24 || m >= 60 {
            return Err(invalid());
        }
        Ok(h * 60 + m)
    }
}

impl fmt::Display for DayClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.hour_minute();
        write!(f, "{h:02}:{m:02}")
    }
}
