pub mod fare;
pub mod format;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod query;
pub mod sequence;
pub mod ticket;
