use chrono::{Datelike, Local, Months, NaiveDate};

/// The server's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole years between `date_of_birth` and `today`.
///
/// A 29 February birthday falls on 28 February in non-leap years.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - date_of_birth.year();
    match anniversary(date_of_birth, age) {
        Some(anniversary) if today < anniversary => age - 1,
        _ => age,
    }
}

/// Age to store for an employee. Without a date of birth the supplied
/// value is kept as-is.
pub fn derive_age(date_of_birth: Option<NaiveDate>, supplied: i32, today: NaiveDate) -> i32 {
    date_of_birth.map_or(supplied, |dob| age_on(dob, today))
}

fn anniversary(date_of_birth: NaiveDate, years: i32) -> Option<NaiveDate> {
    let months = Months::new(years.unsigned_abs().checked_mul(12)?);
    if years >= 0 {
        date_of_birth.checked_add_months(months)
    } else {
        date_of_birth.checked_sub_months(months)
    }
}
