use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::reconcile;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::utils::date::parse_date_arg;

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

/// Show one day's record, lazily creating the default if missing.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Day { resident, date } = cmd {
        let d = match date {
            Some(s) => parse_date_arg(s)?,
            None => clock.today(),
        };

        let pool = DbPool::new(&cfg.database)?;
        let meal = reconcile::get_day(&pool.conn, resident, d)?;

        println!("Resident : {}", meal.resident_id);
        println!("Date     : {}", meal.date);
        println!("Breakfast: {}", yes_no(meal.breakfast));
        println!("Early    : {}", yes_no(meal.early_breakfast));
        println!("Supper   : {}", yes_no(meal.supper));
        println!("Away     : {}", yes_no(meal.away));

        if meal.away {
            warning("This date falls inside an away period; meal changes are rejected until it is cleared.");
        } else if d == clock.today() {
            let cutoff = cfg.cutoff_time()?;
            if clock.time_of_day() > cutoff {
                info(format!(
                    "Breakfast options for today are locked (cutoff {}).",
                    cfg.breakfast_cutoff
                ));
            }
        }
    }

    Ok(())
}
