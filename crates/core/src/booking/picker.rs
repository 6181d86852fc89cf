//! Date/time picker collaborator.

use std::collections::VecDeque;

use jiff::civil::{Date, Time};

/// A platform-supplied modal picker.
///
/// Given an initial value and a minimum bound, a picker returns a single
/// selection or `None` when dismissed with no change. The wizard supplies
/// `minimum = today` for pickup and `minimum = pickup date` for return.
pub trait DateTimePicker {
    /// Pick a date at or after `minimum`, or dismiss.
    fn pick_date(&mut self, initial: Date, minimum: Date) -> Option<Date>;

    /// Pick a time of day, or dismiss.
    fn pick_time(&mut self, initial: Time) -> Option<Time>;
}

/// A picker that replays queued selections, for tests and the CLI demo.
///
/// Like the platform widget, it refuses date selections below the minimum
/// bound: those come back as a dismissal.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    dates: VecDeque<Date>,
    times: VecDeque<Time>,
    minimums: Vec<Date>,
}

impl ScriptedPicker {
    /// Create a picker with nothing queued; every interaction dismisses.
    #[must_use]
    pub fn new() -> Self {
        ScriptedPicker::default()
    }

    /// Queue a date selection.
    pub fn push_date(&mut self, date: Date) {
        self.dates.push_back(date);
    }

    /// Queue a time selection.
    pub fn push_time(&mut self, time: Time) {
        self.times.push_back(time);
    }

    /// Minimum bounds the wizard supplied to date picks, in order.
    #[must_use]
    pub fn minimums(&self) -> &[Date] {
        &self.minimums
    }
}

impl DateTimePicker for ScriptedPicker {
    fn pick_date(&mut self, _initial: Date, minimum: Date) -> Option<Date> {
        self.minimums.push(minimum);

        let date = self.dates.pop_front()?;

        if date < minimum {
            return None;
        }

        Some(date)
    }

    fn pick_time(&mut self, _initial: Time) -> Option<Time> {
        self.times.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn scripted_picker_replays_selections_in_order() {
        let mut picker = ScriptedPicker::new();
        picker.push_date(date(2025, 9, 5));
        picker.push_date(date(2025, 9, 7));

        let today = date(2025, 9, 1);

        assert_eq!(picker.pick_date(today, today), Some(date(2025, 9, 5)));
        assert_eq!(picker.pick_date(today, today), Some(date(2025, 9, 7)));
        assert_eq!(picker.pick_date(today, today), None);
    }

    #[test]
    fn selection_below_minimum_is_a_dismissal() {
        let mut picker = ScriptedPicker::new();
        picker.push_date(date(2025, 9, 1));

        let selection = picker.pick_date(date(2025, 9, 5), date(2025, 9, 5));

        assert_eq!(selection, None);
        assert_eq!(picker.minimums(), [date(2025, 9, 5)]);
    }

    #[test]
    fn times_have_no_minimum_bound() {
        let mut picker = ScriptedPicker::new();
        picker.push_time(time(8, 15, 0, 0));

        assert_eq!(picker.pick_time(time(12, 0, 0, 0)), Some(time(8, 15, 0, 0)));
    }
}
