use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;

/// ANSI color per operation kind.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "confirm" => Colour::Green,
        "away" => Colour::Yellow,
        "resident_add" | "resident_return" => Colour::Blue,
        "export" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Print the internal audit log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if !print {
            info("Nothing to do. Use `log --print` to show the audit log.");
            return Ok(());
        }

        let pool = DbPool::new(&cfg.database)?;
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("Audit log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for (id, date, operation, target, message) in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(date);

            let op = color_for_operation(&operation).paint(operation.clone());
            if target.is_empty() {
                println!("{:>4}  {}  {}  {}", id, date, op, message);
            } else {
                println!("{:>4}  {}  {} ({})  {}", id, date, op, target, message);
            }
        }
    }

    Ok(())
}
