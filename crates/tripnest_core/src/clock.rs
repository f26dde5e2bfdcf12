//! Injectable wall clock.
//!
//! The engine takes `now` as an argument; services read it from a `Clock` so
//! tests can pin time.

use chrono::{Local, NaiveDateTime};

/// Source of the current local civil datetime.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Device-local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
