use chrono::NaiveDate;
use log::debug;

use crate::habit::Habit;
use crate::schedule::is_due_as_of;
use crate::shared::dates::format_date;
use crate::shared::DomainError;

/// Domain service for check-in business rules
/// Contains pure domain logic without infrastructure dependencies
pub struct CheckInDomainService;

impl CheckInDomainService {
    /// Gate a new check-in for `habit` on `date`.
    ///
    /// The schedule predicate is authoritative: it is evaluated after
    /// re-normalizing the stored schedule against `today`.
    pub fn can_check_in(
        habit: &Habit,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), DomainError> {
        if date > today {
            return Err(DomainError::FutureCheckIn(format_date(date)));
        }

        if !is_due_as_of(habit.schedule(), date, today) {
            debug!(
                "[check_in] rejected habit_id={} date={} mode={}",
                habit.id(),
                date,
                habit.schedule().mode()
            );
            return Err(DomainError::NotScheduled(format_date(date)));
        }

        Ok(())
    }
}
