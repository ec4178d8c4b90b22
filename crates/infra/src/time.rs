use chrono::{DateTime, Datelike, Local, NaiveDate, Utc, Weekday};

/// Whether two instants fall on the same local calendar day. Day boundaries
/// follow the wall clock, not the UTC day.
pub fn same_local_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    local_day(a) == local_day(b)
}

pub fn is_today(t: DateTime<Utc>) -> bool {
    local_day(t) == today()
}

pub fn local_day(t: DateTime<Utc>) -> NaiveDate {
    t.with_timezone(&Local).date_naive()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Wall-clock time remaining until the next local midnight. Computed on naive
/// local time so a DST shift stretches or shrinks the wait the same way a
/// bedside clock would.
pub fn until_next_midnight(now: DateTime<Local>) -> std::time::Duration {
    let next_day = now.date_naive().succ_opt().unwrap_or(now.date_naive());
    let next_midnight = next_day.and_time(chrono::NaiveTime::MIN);
    next_midnight
        .signed_duration_since(now.naive_local())
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(60))
}

/// Short "M/D" date label used by the weekly attendance chart.
pub fn short_date(d: NaiveDate) -> String {
    format!("{}/{}", d.month(), d.day())
}

pub fn weekday_label(d: NaiveDate) -> &'static str {
    match d.weekday() {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}
