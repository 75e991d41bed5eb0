pub mod hooks;
pub mod session;
