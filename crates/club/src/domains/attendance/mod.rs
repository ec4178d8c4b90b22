pub mod service;

pub use service::{
    check_in_guest, check_in_member, CheckInGuestParams, CheckInMemberParams, CheckInOutcome,
};
