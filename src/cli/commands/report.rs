use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::report::daily_report;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date::parse_date_arg;

/// Kitchen headcounts and unconfirmed residents for one date.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Report { date, json } = cmd {
        let d = match date {
            Some(s) => parse_date_arg(s)?,
            None => clock.today(),
        };

        let pool = DbPool::new(&cfg.database)?;
        let report = daily_report(&pool.conn, d)?;

        if *json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report)
                    .map_err(|e| AppError::Other(format!("serialize report: {e}")))?
            );
            return Ok(());
        }

        println!("Meal report for {}", report.date);
        println!("  Breakfast      : {}", report.breakfast_count);
        println!("  Early breakfast: {}", report.early_breakfast_count);
        println!("  Supper         : {}", report.supper_count);
        println!("  Away           : {}", report.away_count);
        println!("  Unconfirmed    : {}", report.unconfirmed.len());

        if !report.unconfirmed.is_empty() {
            let limit = cfg.unconfirmed_display_limit;
            let shown: Vec<&str> = report
                .unconfirmed
                .iter()
                .take(limit)
                .map(String::as_str)
                .collect();
            let mut line = shown.join(", ");
            if report.unconfirmed.len() > limit {
                line.push_str(&format!(" … and {} more", report.unconfirmed.len() - limit));
            }
            info(format!("No record yet: {}", line));
        }
    }

    Ok(())
}
