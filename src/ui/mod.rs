pub mod status;
pub mod table;

pub use status::{seed_summary, stats_heading};
pub use table::{TableBuilder, stats_table};
