//! Timezone-aware derivation of the service's numeric date-serial value.
//!
//! The service has no timezone concept: it stores an absolute serial number
//! and renders it in its own zone. The only way to make the printed footer
//! match an intended timezone is to take the instant's wall-clock reading in
//! that zone and reinterpret it as UTC before serializing. The original
//! offset is discarded on purpose.

use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use chrono_tz::Tz;

/// Day-count offset between the Unix epoch (1970-01-01) and the service's
/// epoch (1899-12-30).
const SERIAL_EPOCH_OFFSET_DAYS: f64 = 25569.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Converts `instant` into the date-serial number whose rendered value, in
/// the service's own zone, reads as the instant's wall-clock time in `zone`.
/// The wall-clock reading has second precision, matching the service's
/// `YYYY-MM-DDTHH:mm:ss` rendering, so sub-second detail is truncated.
pub(crate) fn resolve_serial(instant: DateTime<Utc>, zone: Tz) -> f64 {
    // Wall-clock reading in the chosen zone, reinterpreted as UTC.
    let wall_clock = instant.with_timezone(&zone).naive_local().trunc_subsecs(0);
    let shifted = Utc.from_utc_datetime(&wall_clock);
    shifted.timestamp_millis() as f64 / MILLIS_PER_DAY + SERIAL_EPOCH_OFFSET_DAYS
}
