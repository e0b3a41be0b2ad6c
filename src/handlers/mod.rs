pub mod auth;
pub mod booking;
pub mod details;
pub mod results;
pub mod search;
