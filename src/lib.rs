pub mod config;
pub mod output;
pub mod roster;
pub mod scoring;
pub mod survey;
