pub mod activity;
pub mod auth;
pub mod catalog;
pub mod marks;
pub mod progress;
pub mod quiz;
pub mod user;
