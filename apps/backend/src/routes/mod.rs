pub mod auth;
pub mod device;
pub mod scores;
pub mod sessions;
pub mod sets;
