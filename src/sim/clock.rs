use chrono::{NaiveDateTime, TimeDelta};

/// A wall-clock simulation clock that advances in fixed steps over a bounded
/// interval.
///
/// Each tick yields the start instant of one step; the step covers
/// `[start, start + step)`. The clock stops once the next step would begin
/// at or after `end`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use ev_charge_sim::sim::clock::Clock;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 31)
///     .and_then(|d| d.and_hms_opt(9, 0, 0))
///     .unwrap();
/// let mut clock = Clock::new(start, start + TimeDelta::minutes(3), TimeDelta::minutes(1));
/// let mut minutes = Vec::new();
///
/// while let Some(t) = clock.tick() {
///     minutes.push(t.format("%H:%M").to_string());
/// }
/// assert_eq!(minutes, vec!["09:00", "09:01", "09:02"]);
/// ```
pub struct Clock {
    /// Start of the next step.
    current: NaiveDateTime,
    /// Instant at which the clock stops.
    end: NaiveDateTime,
    /// Step length.
    step: TimeDelta,
}

impl Clock {
    /// Creates a new clock running from `start` until `end` in `step` increments.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, step: TimeDelta) -> Self {
        Self {
            current: start,
            end,
            step,
        }
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// * `Some(t)` - The start instant of the step just taken
    /// * `None` - If the clock has reached `end`
    pub fn tick(&mut self) -> Option<NaiveDateTime> {
        if self.current < self.end && self.step > TimeDelta::zero() {
            let t = self.current;
            self.current += self.step;
            Some(t)
        } else {
            None
        }
    }

    /// Current clock reading: the end of the last step taken.
    pub fn now(&self) -> NaiveDateTime {
        self.current
    }

    /// Returns `true` once no further steps remain.
    pub fn is_finished(&self) -> bool {
        self.current >= self.end
    }
}
