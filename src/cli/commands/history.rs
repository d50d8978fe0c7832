use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::db::meal_days::{self, DateOrder};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date::parse_date_arg;
use crate::utils::table::Table;
use chrono::Duration;

fn mark(v: bool) -> &'static str {
    if v { "x" } else { "" }
}

/// Show a resident's meal history, newest first.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::History {
        resident,
        from,
        to,
        json,
    } = cmd
    {
        let to_d = match to {
            Some(s) => parse_date_arg(s)?,
            None => clock.today(),
        };
        let from_d = match from {
            Some(s) => parse_date_arg(s)?,
            None => to_d - Duration::days(30),
        };
        if from_d > to_d {
            return Err(AppError::InvalidRange {
                start: from_d,
                end: to_d,
            });
        }

        let pool = DbPool::new(&cfg.database)?;
        let rows = meal_days::list(&pool.conn, resident, from_d, to_d, DateOrder::Descending)?;

        if *json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows)
                    .map_err(|e| AppError::Other(format!("serialize history: {e}")))?
            );
            return Ok(());
        }

        if rows.is_empty() {
            info(format!(
                "No meal records for {} between {} and {}.",
                resident, from_d, to_d
            ));
            return Ok(());
        }

        let mut table = Table::new(vec!["Date", "Breakfast", "Early", "Supper", "Away"]);
        for m in &rows {
            table.add_row(vec![
                m.date.to_string(),
                mark(m.breakfast).to_string(),
                mark(m.early_breakfast).to_string(),
                mark(m.supper).to_string(),
                mark(m.away).to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
