pub mod content;

pub use content::{Page, PAGES};
