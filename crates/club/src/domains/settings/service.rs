use infra::models::CourtCell;

/// All-inactive starting layout.
pub fn default_grid(rows: usize, cols: usize) -> Vec<Vec<CourtCell>> {
    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| CourtCell {
                    row,
                    col,
                    is_active: false,
                    court_number: None,
                })
                .collect()
        })
        .collect()
}

/// Flip one cell and renumber. Court numbers stay dense 1..N in row-major
/// order, so toggling an earlier cell shifts every later court's number.
/// Out-of-range coordinates are ignored.
pub fn toggle_cell(grid: &mut [Vec<CourtCell>], row: usize, col: usize) {
    let Some(cell) = grid.get_mut(row).and_then(|cells| cells.get_mut(col)) else {
        return;
    };
    cell.is_active = !cell.is_active;
    renumber(grid);
}

pub fn active_count(grid: &[Vec<CourtCell>]) -> usize {
    grid.iter().flatten().filter(|cell| cell.is_active).count()
}

fn renumber(grid: &mut [Vec<CourtCell>]) {
    let mut next = 1;
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            cell.court_number = if cell.is_active {
                let number = next;
                next += 1;
                Some(number)
            } else {
                None
            };
        }
    }
}
