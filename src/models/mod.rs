pub mod away_period;
pub mod meal_day;
pub mod meal_flag;
pub mod resident;

pub use away_period::AwayPeriod;
pub use meal_day::{MealDay, MealFlags};
pub use meal_flag::MealFlag;
pub use resident::Resident;
