use chrono::{Duration, Local, NaiveDate, NaiveTime, Utc};
use infra::time;

#[test]
fn test_short_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(time::short_date(date), "3/5");
    let date = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
    assert_eq!(time::short_date(date), "11/30");
}

#[test]
fn test_weekday_label() {
    let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(time::weekday_label(monday), "Mon");
    let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    assert_eq!(time::weekday_label(sunday), "Sun");
}

#[test]
fn test_same_local_day() {
    let now = Utc::now();
    assert!(time::same_local_day(now, now));
    assert!(!time::same_local_day(now, now - Duration::hours(48)));
}

#[test]
fn test_is_today() {
    assert!(time::is_today(Utc::now()));
    assert!(!time::is_today(Utc::now() - Duration::days(2)));
}

#[test]
fn test_until_next_midnight() {
    let now = Local::now();
    let wait = time::until_next_midnight(now);
    assert!(wait <= std::time::Duration::from_secs(24 * 60 * 60));

    // Adding the wait to the wall clock lands exactly on the next midnight
    let landed = now.naive_local() + Duration::from_std(wait).unwrap();
    let midnight = now
        .date_naive()
        .succ_opt()
        .unwrap()
        .and_time(NaiveTime::MIN);
    assert_eq!(landed, midnight);
}
