use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CourtCell, CourtSettingsRow};
use crate::store::{DocumentStore, Result};

const COLLECTION: &str = "court_settings";

// The layout is a singleton document; a fixed id makes save an upsert.
const SETTINGS_ID: Uuid = Uuid::nil();

/// Persisted shape of the layout. The grid is flattened to one cell list
/// with explicit dimensions so it survives ragged or resized rows.
#[derive(Debug, Serialize, Deserialize)]
struct CourtSettingsDoc {
    cells: Vec<CourtCell>,
    rows: usize,
    cols: usize,
    updated_at: DateTime<Utc>,
}

pub async fn get(store: &DocumentStore) -> Result<Option<CourtSettingsRow>> {
    let Some(doc) = store.get::<CourtSettingsDoc>(COLLECTION, SETTINGS_ID).await? else {
        return Ok(None);
    };
    let mut grid: Vec<Vec<CourtCell>> = (0..doc.rows)
        .map(|row| {
            (0..doc.cols)
                .map(|col| CourtCell {
                    row,
                    col,
                    is_active: false,
                    court_number: None,
                })
                .collect()
        })
        .collect();
    for cell in doc.cells {
        if cell.row < doc.rows && cell.col < doc.cols {
            let (row, col) = (cell.row, cell.col);
            grid[row][col] = cell;
        }
    }
    Ok(Some(CourtSettingsRow {
        grid,
        updated_at: doc.updated_at,
    }))
}

pub async fn save(
    store: &DocumentStore,
    grid: Vec<Vec<CourtCell>>,
) -> Result<CourtSettingsRow> {
    let row = CourtSettingsRow {
        grid,
        updated_at: Utc::now(),
    };
    let doc = CourtSettingsDoc {
        cells: row.grid.iter().flatten().cloned().collect(),
        rows: row.rows(),
        cols: row.cols(),
        updated_at: row.updated_at,
    };
    store.set(COLLECTION, SETTINGS_ID, &doc).await?;
    Ok(row)
}
