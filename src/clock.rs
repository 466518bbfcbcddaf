//! Clock

use std::fmt;

use jiff::{Zoned, civil::Date};

#[cfg(test)]
use mockall::automock;

/// Source of the current date for product entry dates.
#[cfg_attr(test, automock)]
pub trait Clock: fmt::Debug {
    /// Today's date.
    fn today(&self) -> Date;
}

/// Clock reading the system time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Zoned::now().date()
    }
}

/// Clock that always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn fixed_clock_returns_its_date() {
        assert_eq!(FixedClock(date(2024, 3, 5)).today(), date(2024, 3, 5));
    }

    #[test]
    fn mock_clock_is_a_clock() {
        let mut clock = MockClock::new();
        clock.expect_today().return_const(date(2025, 1, 1));

        let clock: Box<dyn Clock> = Box::new(clock);

        assert_eq!(clock.today(), date(2025, 1, 1));
    }
}
