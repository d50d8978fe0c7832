use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::confirm::{ConfirmRequest, confirm};
use crate::db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_date_arg;

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

/// Confirm a resident's meals for one date.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Confirm {
        resident,
        date,
        breakfast,
        early,
        supper,
    } = cmd
    {
        let d = parse_date_arg(date)?;
        let pool = DbPool::new(&cfg.database)?;

        let req = ConfirmRequest {
            breakfast: *breakfast,
            early_breakfast: *early,
            supper: *supper,
        };

        let outcome = confirm(&pool.conn, clock, cfg, resident, d, req)?;
        let meal = &outcome.meal;

        success(format!(
            "Meals updated for {} on {}: breakfast={}, early={}, supper={}",
            resident,
            meal.date,
            yes_no(meal.breakfast),
            yes_no(meal.early_breakfast),
            yes_no(meal.supper),
        ));

        // Non-fatal: the write succeeded, but the cutoff kept the stored
        // breakfast-class values.
        if outcome.breakfast_locked {
            warning(format!(
                "Breakfast options are locked for today after {}; your breakfast request was ignored.",
                cfg.breakfast_cutoff
            ));
        }

        db::ttlog(
            &pool.conn,
            "confirm",
            resident,
            &format!(
                "date={} breakfast={} early={} supper={} locked={}",
                meal.date, meal.breakfast, meal.early_breakfast, meal.supper, outcome.breakfast_locked
            ),
        )?;
    }

    Ok(())
}
