//! Transilien next-departures API.
//!
//! This module provides an HTTP client for the SNCF Transilien API, which
//! lists the next trains leaving a station, and a parser for the XML boards
//! it returns.
//!
//! Key characteristics of the API:
//! - Authentication is HTTP basic auth with static credentials
//! - Stations are identified by 8-digit UIC codes
//! - Times are local "DD/MM/YYYY HH:MM" strings with no time zone

mod client;
mod error;
mod parse;
mod types;

pub use client::{TransilienClient, TransilienConfig, decode_body};
pub use error::{EntryError, FetchError, ParseError};
pub use parse::{parse_departures, parse_schedule};
pub use types::Departure;
