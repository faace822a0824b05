pub mod auth;
pub mod ubs;
