//! Top-level facade crate for quickserve.
//!
//! Re-exports the shared primitives, the order simulator and the content
//! server so users can depend on a single crate.

pub mod core {
    pub use quickserve_core::*;
}

pub mod sim {
    pub use quickserve_sim::*;
}

pub mod web {
    pub use quickserve_web::*;
}
