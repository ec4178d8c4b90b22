use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{AttendanceRow, GuestInfo};
use crate::store::{DocumentStore, Result, StoreError};
use crate::time;

const COLLECTION: &str = "attendance";

#[derive(Debug, Clone)]
pub struct CheckInData {
    pub member_id: Uuid,
    pub member_name: String,
    pub shuttlecock_count: i64,
    pub guest_info: Option<GuestInfo>,
}

/// One bar of the weekly attendance chart.
#[derive(Debug, Clone)]
pub struct DailyAttendanceCount {
    pub date: String,
    pub day: String,
    pub count: i64,
}

/// Register a check-in for today. A member checks in at most once per local
/// day; a second attempt fails with `Conflict`.
pub async fn check_in(store: &DocumentStore, data: CheckInData) -> Result<AttendanceRow> {
    let now = Utc::now();
    let existing: Vec<AttendanceRow> = store.list(COLLECTION).await?;
    if existing
        .iter()
        .any(|row| row.member_id == data.member_id && time::same_local_day(row.date, now))
    {
        return Err(StoreError::Conflict(format!(
            "{} has already checked in today",
            data.member_name
        )));
    }
    let row = AttendanceRow {
        id: Uuid::new_v4(),
        member_id: data.member_id,
        member_name: data.member_name,
        date: now,
        shuttlecock_count: data.shuttlecock_count,
        has_left: false,
        guest_info: data.guest_info,
        created_at: now,
    };
    store.insert(COLLECTION, row.id, &row).await?;
    Ok(row)
}

pub async fn list_today(store: &DocumentStore) -> Result<Vec<AttendanceRow>> {
    let mut rows: Vec<AttendanceRow> = store.list(COLLECTION).await?;
    rows.retain(|row| time::is_today(row.date));
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(rows)
}

pub async fn list_all(store: &DocumentStore) -> Result<Vec<AttendanceRow>> {
    let mut rows: Vec<AttendanceRow> = store.list(COLLECTION).await?;
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(rows)
}

pub async fn update_shuttlecock_count(
    store: &DocumentStore,
    id: Uuid,
    shuttlecock_count: i64,
) -> Result<AttendanceRow> {
    let mut row: AttendanceRow =
        store.get(COLLECTION, id).await?.ok_or(StoreError::NotFound {
            collection: COLLECTION,
            id,
        })?;
    row.shuttlecock_count = shuttlecock_count;
    store.set(COLLECTION, id, &row).await?;
    Ok(row)
}

pub async fn set_left_status(
    store: &DocumentStore,
    id: Uuid,
    has_left: bool,
) -> Result<AttendanceRow> {
    let mut row: AttendanceRow =
        store.get(COLLECTION, id).await?.ok_or(StoreError::NotFound {
            collection: COLLECTION,
            id,
        })?;
    row.has_left = has_left;
    store.set(COLLECTION, id, &row).await?;
    Ok(row)
}

pub async fn delete(store: &DocumentStore, id: Uuid) -> Result<()> {
    store.delete(COLLECTION, id).await?;
    Ok(())
}

pub async fn delete_all(store: &DocumentStore) -> Result<u64> {
    store.clear(COLLECTION).await
}

/// Check-in counts for the seven local days ending today, oldest first.
/// Days without attendance still produce an entry with a zero count.
pub async fn weekly_counts(
    store: &DocumentStore,
    today: NaiveDate,
) -> Result<Vec<DailyAttendanceCount>> {
    let rows: Vec<AttendanceRow> = store.list(COLLECTION).await?;
    let mut counts = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let day = today - Duration::days(offset);
        let count = rows
            .iter()
            .filter(|row| time::local_day(row.date) == day)
            .count() as i64;
        counts.push(DailyAttendanceCount {
            date: time::short_date(day),
            day: time::weekday_label(day).to_string(),
            count,
        });
    }
    Ok(counts)
}
