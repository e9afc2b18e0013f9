use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

/// Unix seconds of local midnight for the calendar day of `now`.
pub fn start_of_local_day<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
	let midnight = now.date_naive().and_time(NaiveTime::MIN);
	match now.timezone().from_local_datetime(&midnight).earliest() {
		Some(start) => start.timestamp(),
		// midnight skipped by a DST transition
		None => Utc.from_utc_datetime(&midnight).timestamp(),
	}
}

pub fn start_of_today() -> i64 {
	start_of_local_day(&Local::now())
}
