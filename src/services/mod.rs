pub mod cache;
pub mod email;
pub mod infra;
