//! Tick-driven grid snake: a deterministic simulation engine, a timer-owning
//! driver, and a ratatui front end that paints engine snapshots.

pub mod app;
pub mod config;
pub mod driver;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod random;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
