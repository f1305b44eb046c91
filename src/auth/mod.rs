pub mod credentials;
pub mod strategy;

pub use strategy::{LoginFailure, LoginOutcome, authenticate};
