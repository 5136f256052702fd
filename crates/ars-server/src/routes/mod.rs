pub mod config;
pub mod dialog;
pub mod health;
pub mod patients;
pub mod questions;
pub mod risk;
