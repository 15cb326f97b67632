use chrono::{DateTime, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Default date of a new payment.
pub fn today() -> NaiveDate {
    now().date_naive()
}
