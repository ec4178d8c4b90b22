use uuid::Uuid;

use infra::models::{AttendanceRow, Gender, GuestInfo, SkillGrade};
use infra::repos::{attendance, attendance::CheckInData, members};
use infra::DocumentStore;

/// Parameters for a member check-in.
pub struct CheckInMemberParams {
    pub member_id: Uuid,
    pub shuttlecock_count: i64,
}

/// Parameters for a guest check-in. Profile fields are optional; the session
/// roster falls back to male / C for whatever is left out.
pub struct CheckInGuestParams {
    pub name: String,
    pub shuttlecock_count: i64,
    pub gender: Option<Gender>,
    pub skill_grade: Option<SkillGrade>,
    pub birth_year: Option<i32>,
}

/// Result of a successful check-in.
#[derive(Debug)]
pub struct CheckInOutcome {
    pub attendance: AttendanceRow,
    pub message: String,
}

/// Check a registered member in for today. The repo rejects a second
/// check-in on the same local day.
pub async fn check_in_member(
    store: &DocumentStore,
    params: CheckInMemberParams,
) -> Result<CheckInOutcome, Box<dyn std::error::Error + Send + Sync>> {
    // Resolve the member before writing anything
    let member = members::get_by_id(store, params.member_id)
        .await?
        .ok_or("Member not found")?;

    let row = attendance::check_in(
        store,
        CheckInData {
            member_id: member.id,
            member_name: member.name.clone(),
            shuttlecock_count: params.shuttlecock_count,
            guest_info: None,
        },
    )
    .await?;

    Ok(CheckInOutcome {
        message: format!("{} checked in successfully", member.name),
        attendance: row,
    })
}

/// Check a guest in for today. Guests get a synthetic member id that exists
/// only in the attendance record; their profile travels in `guest_info`.
pub async fn check_in_guest(
    store: &DocumentStore,
    params: CheckInGuestParams,
) -> Result<CheckInOutcome, Box<dyn std::error::Error + Send + Sync>> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err("Guest name must not be empty".into());
    }

    let row = attendance::check_in(
        store,
        CheckInData {
            member_id: Uuid::new_v4(),
            member_name: name.to_string(),
            shuttlecock_count: params.shuttlecock_count,
            guest_info: Some(GuestInfo {
                gender: params.gender,
                skill_grade: params.skill_grade,
                birth_year: params.birth_year,
            }),
        },
    )
    .await?;

    Ok(CheckInOutcome {
        message: format!("Guest {name} checked in successfully"),
        attendance: row,
    })
}
