//! Trace Runner: flap through scrolling barriers in the terminal.

pub mod app;
pub mod config;
pub mod event;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod ui;
