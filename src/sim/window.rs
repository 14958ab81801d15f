//! Daily operating window and the validated connection window of a session.

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::error::SimError;

/// Daily bounds within which a session must start and end.
///
/// # Examples
///
/// ```
/// use ev_charge_sim::sim::window::OperatingWindow;
///
/// let window = OperatingWindow::default();
/// assert_eq!(window.start.to_string(), "09:00:00");
/// assert_eq!(window.end.to_string(), "21:00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatingWindow {
    /// Time of day the window opens (inclusive).
    pub start: NaiveTime,
    /// Time of day the window closes (inclusive bound for disconnection).
    pub end: NaiveTime,
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::MIN + chrono::TimeDelta::hours(9),
            end: NaiveTime::MIN + chrono::TimeDelta::hours(21),
        }
    }
}

impl OperatingWindow {
    /// Creates an operating window.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidOperatingWindow` unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, SimError> {
        if start >= end {
            return Err(SimError::InvalidOperatingWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Length of the window in whole minutes.
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A plug-in interval validated against an operating window.
///
/// Holds the concrete window bounds for the session date. Only
/// [`ConnectionWindow::new`] can build one, so every instance satisfies
/// `window_start <= connection < disconnection <= window_end` on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionWindow {
    connection: NaiveDateTime,
    disconnection: NaiveDateTime,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
}

impl ConnectionWindow {
    /// Validates a connection/disconnection pair.
    ///
    /// Checks run in order: same calendar day, both times inside the
    /// operating window, then connection strictly before disconnection.
    ///
    /// # Errors
    ///
    /// Returns the first `SimError` encountered.
    pub fn new(
        connection: NaiveDateTime,
        disconnection: NaiveDateTime,
        operating: OperatingWindow,
    ) -> Result<Self, SimError> {
        if connection.date() != disconnection.date() {
            return Err(SimError::DifferentDays {
                connection: connection.date(),
                disconnection: disconnection.date(),
            });
        }

        let window_start = connection.date().and_time(operating.start);
        let window_end = connection.date().and_time(operating.end);

        for (field, time) in [("connection", connection), ("disconnection", disconnection)] {
            if time < window_start || time > window_end {
                return Err(SimError::OutsideOperatingWindow {
                    field,
                    time,
                    start: operating.start,
                    end: operating.end,
                });
            }
        }

        if connection >= disconnection {
            return Err(SimError::InvalidOrder {
                connection,
                disconnection,
            });
        }

        Ok(Self {
            connection,
            disconnection,
            window_start,
            window_end,
        })
    }

    pub fn connection(&self) -> NaiveDateTime {
        self.connection
    }

    pub fn disconnection(&self) -> NaiveDateTime {
        self.disconnection
    }

    pub fn window_start(&self) -> NaiveDateTime {
        self.window_start
    }

    pub fn window_end(&self) -> NaiveDateTime {
        self.window_end
    }

    /// Returns `true` when `time` falls within `[connection, disconnection)`.
    pub fn is_connected(&self, time: NaiveDateTime) -> bool {
        time >= self.connection && time < self.disconnection
    }
}
