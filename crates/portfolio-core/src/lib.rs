//! Portfolio Widgets Core Library
//!
//! The logic behind the site's interactive widgets, free of any display
//! layer.
//!
//! ## Overview
//!
//! - **tarkov**: in-game clock running at 7x real time, two zones half a
//!   day apart, and an open/closed window with countdowns
//! - **craft**: crafting timer (start instant + duration)
//! - **cards**: card gallery catalog loaded from static JSON
//! - **storage**: redb persistence for the crafting timer
//!
//! ## Quick Start
//!
//! ```ignore
//! use portfolio_core::tarkov::{TarkovClock, ZoneTicker, DEFAULT_PERIOD};
//! use portfolio_core::tarkov::SystemNow;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ticker = ZoneTicker::spawn(TarkovClock::new(), DEFAULT_PERIOD, SystemNow);
//!     let mut rx = ticker.subscribe();
//!     while rx.changed().await.is_ok() {
//!         let pair = rx.borrow().clone();
//!         println!("{} | {}", pair.left.clock, pair.right.clock);
//!     }
//! }
//! ```

pub mod cards;
pub mod craft;
pub mod error;
pub mod storage;
pub mod tarkov;

// Re-exports
pub use cards::{Card, CardCatalog};
pub use craft::{CraftDuration, CraftProgress, CraftTimer};
pub use error::{PortfolioError, PortfolioResult};
pub use storage::Storage;
pub use tarkov::{
    compute, EvaluationMode, Labels, ScheduleStatus, SimulatedClockReading, TarkovClock,
    TarkovStatus, Zone, ZonePair, ZoneTicker,
};
