pub mod attendance;
pub mod games;
pub mod members;
pub mod settings;

pub use attendance::{CheckInData, DailyAttendanceCount};
pub use games::CreateGameData;
pub use members::{CreateMemberData, UpdateMemberData};
