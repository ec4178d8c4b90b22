use chrono::Utc;
use uuid::Uuid;

use crate::models::{Gender, MemberRow, SkillGrade};
use crate::store::{DocumentStore, Result, StoreError};

const COLLECTION: &str = "members";

#[derive(Debug, Clone)]
pub struct CreateMemberData {
    pub name: String,
    pub birth_year: Option<i32>,
    pub gender: Gender,
    pub skill_grade: SkillGrade,
}

#[derive(Debug, Clone)]
pub struct UpdateMemberData {
    pub name: Option<String>,
    pub birth_year: Option<i32>,
    pub gender: Option<Gender>,
    pub skill_grade: Option<SkillGrade>,
    pub games_played: Option<i64>,
    pub games_won: Option<i64>,
}

pub async fn create(store: &DocumentStore, data: CreateMemberData) -> Result<MemberRow> {
    let now = Utc::now();
    let row = MemberRow {
        id: Uuid::new_v4(),
        name: data.name,
        birth_year: data.birth_year,
        gender: data.gender,
        skill_grade: data.skill_grade,
        games_played: 0,
        games_won: 0,
        created_at: now,
        updated_at: now,
    };
    store.insert(COLLECTION, row.id, &row).await?;
    Ok(row)
}

pub async fn get_by_id(store: &DocumentStore, id: Uuid) -> Result<Option<MemberRow>> {
    store.get(COLLECTION, id).await
}

pub async fn list(store: &DocumentStore) -> Result<Vec<MemberRow>> {
    let mut members: Vec<MemberRow> = store.list(COLLECTION).await?;
    members.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(members)
}

pub async fn update(
    store: &DocumentStore,
    id: Uuid,
    data: UpdateMemberData,
) -> Result<MemberRow> {
    let mut row: MemberRow = store.get(COLLECTION, id).await?.ok_or(StoreError::NotFound {
        collection: COLLECTION,
        id,
    })?;
    if let Some(name) = data.name {
        row.name = name;
    }
    if let Some(birth_year) = data.birth_year {
        row.birth_year = Some(birth_year);
    }
    if let Some(gender) = data.gender {
        row.gender = gender;
    }
    if let Some(skill_grade) = data.skill_grade {
        row.skill_grade = skill_grade;
    }
    if let Some(games_played) = data.games_played {
        row.games_played = games_played;
    }
    if let Some(games_won) = data.games_won {
        row.games_won = games_won;
    }
    row.updated_at = Utc::now();
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

/// Bump a member's match counters after a completed game. Missing ids are
/// ignored so guest players fall through without a record.
pub async fn record_game_result(store: &DocumentStore, id: Uuid, won: bool) -> Result<()> {
    let Some(mut row) = store.get::<MemberRow>(COLLECTION, id).await? else {
        return Ok(());
    };
    row.games_played += 1;
    if won {
        row.games_won += 1;
    }
    row.updated_at = Utc::now();
    store.set(COLLECTION, id, &row).await
}
