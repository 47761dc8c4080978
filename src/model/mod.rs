// File: ./src/model/mod.rs
pub mod display;
pub mod event;
pub mod matcher;

pub use event::{Category, CategoryFilter, Event, Group};
