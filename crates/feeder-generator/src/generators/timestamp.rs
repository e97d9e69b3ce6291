//! Date and timestamp generators relative to a reference instant.

use super::YEAR_SECONDS;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;

/// Generate a calendar date within the year before `reference`.
pub fn generate_past_date<R: Rng>(rng: &mut R, reference: DateTime<Utc>) -> NaiveDate {
    let offset = rng.gen_range(1..=YEAR_SECONDS);
    (reference - Duration::seconds(offset)).date_naive()
}

/// Generate a timestamp within the year after `reference`.
pub fn generate_future_timestamp<R: Rng>(rng: &mut R, reference: DateTime<Utc>) -> DateTime<Utc> {
    let offset = rng.gen_range(1..=YEAR_SECONDS);
    reference + Duration::seconds(offset)
}
