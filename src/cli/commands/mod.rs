pub mod away;
pub mod config;
pub mod confirm;
pub mod day;
pub mod db;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod report;
pub mod resident;
pub mod trend;
