pub mod daily;

pub use daily::{AggregationPass, DailyAggregator};
