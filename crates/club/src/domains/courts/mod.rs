pub mod board;
pub mod service;
pub mod types;

pub use board::{
    active_courts, available_players, busy_player_ids, card_size, court_grid, format_elapsed,
    play_status, playing_roster, session_players, waiting_roster,
};
pub use service::{
    CancelledReservation, CompleteGameOutcome, CompleteGameParams, ReserveGameOutcome,
    ReserveGameParams, StartGameOutcome, StartGameParams,
};
pub use types::{CardSize, Court, CourtGrid, LineupPlayer, PlayStatus, RosterEntry, SessionPlayer};
