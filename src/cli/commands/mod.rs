pub mod add;
pub mod diagnose;
pub mod list;
pub mod remove;
pub mod search;
pub mod show;
pub mod stats;
pub mod update;
