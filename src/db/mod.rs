pub mod away_periods;
pub mod initialize;
pub mod log;
pub mod meal_days;
pub mod migrate;
pub mod pool;
pub mod residents;

pub use initialize::init_db;
pub use log::ttlog;
