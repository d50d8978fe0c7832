use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::reconcile;
use crate::db;
use crate::db::away_periods;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date_arg;
use crate::utils::table::Table;

/// Declare an away period and reconcile every covered day, or list the
/// resident's declared periods.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Away {
        resident,
        from,
        to,
        list,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *list {
            return print_periods(&pool, resident, clock);
        }

        // clap guarantees both dates are present when not listing
        let (from, to) = match (from, to) {
            (Some(f), Some(t)) => (f, t),
            _ => return Err(AppError::Other("missing away dates".to_string())),
        };
        let start = parse_date_arg(from)?;
        let end = parse_date_arg(to)?;

        let period = reconcile::mark_away(&pool.conn, resident, start, end)?;

        success(format!(
            "Away mode set for {} from {} to {} ({} day(s) forced to no meals)",
            resident,
            period.start_date,
            period.end_date,
            period.len_days(),
        ));

        db::ttlog(
            &pool.conn,
            "away",
            resident,
            &format!("period #{} {}..={}", period.id, period.start_date, period.end_date),
        )?;
    }

    Ok(())
}

fn print_periods(pool: &DbPool, resident: &str, clock: &dyn Clock) -> AppResult<()> {
    let periods = away_periods::list_for_resident(&pool.conn, resident)?;

    if periods.is_empty() {
        info(format!("No away periods declared for {}.", resident));
        return Ok(());
    }

    let today = clock.today();
    let mut table = Table::new(vec!["Id", "From", "To", "Days", "Covers today"]);
    for p in &periods {
        table.add_row(vec![
            p.id.to_string(),
            p.start_date.to_string(),
            p.end_date.to_string(),
            p.len_days().to_string(),
            if p.covers(today) { "yes" } else { "" }.to_string(),
        ]);
    }
    print!("{}", table.render());
    info(format!("{} period(s) declared.", periods.len()));

    Ok(())
}
