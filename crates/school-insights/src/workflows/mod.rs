pub mod attendance;
pub mod roster;
