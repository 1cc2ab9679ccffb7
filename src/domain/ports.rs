use chrono::{Local, NaiveDate, NaiveDateTime};
use std::cell::Cell;

/// Source of the check-in date and check-out timestamp.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at: Cell::new(at) }
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.at.set(at);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.at.set(self.at.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at.get()
    }
}
