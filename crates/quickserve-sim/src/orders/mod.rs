//! Synthetic order simulation.
//!
//! - `order`: one order and its derived lifecycle state
//! - `machines`: per-category capacity and busy counts
//! - `window`: bounded-retention samples of completed orders
//! - `stats`: mean / p99 / slow-percentage helpers
//! - `simulator`: the tick-driven state machine tying them together

pub mod machines;
pub mod order;
pub mod simulator;
pub mod stats;
pub mod window;

pub use machines::MachinePool;
pub use order::{Order, OrderState};
pub use simulator::{OrderSimulator, TickReport};
pub use stats::{CategoryStats, SeriesStats};
pub use window::{Sample, SlidingWindow};
