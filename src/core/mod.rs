pub mod clock;
pub mod confirm;
pub mod reconcile;
pub mod report;
