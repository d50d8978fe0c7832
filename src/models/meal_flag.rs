use serde::Serialize;

/// Closed set of per-day flags on a meal record.
///
/// The flag names double as column names, so counting queries are built
/// from this enum and never from free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MealFlag {
    Breakfast,
    EarlyBreakfast,
    Supper,
    Away,
}

impl MealFlag {
    /// Column name in the `meal_days` table.
    pub fn column(&self) -> &'static str {
        match self {
            MealFlag::Breakfast => "breakfast",
            MealFlag::EarlyBreakfast => "early_breakfast",
            MealFlag::Supper => "supper",
            MealFlag::Away => "away",
        }
    }
}
