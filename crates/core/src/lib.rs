#![forbid(unsafe_code)]

pub mod analytics;
pub mod distractor;
pub mod error;
pub mod mastery;
pub mod model;
pub mod time;

pub use error::Error;
pub use time::Clock;
