//! Transilien departure watcher.
//!
//! Polls the Transilien API for the next trains leaving a station and shows
//! how long until each one leaves, on the terminal or on a character LCD.

pub mod config;
pub mod display;
pub mod domain;
pub mod refresh;
pub mod transilien;
pub mod watcher;
