pub mod rng;
pub mod time;

pub use rng::Rng;
pub use time::{FixedTimestep, IntervalTimer};
