pub mod date;
pub mod table;

pub use date::parse_date;
