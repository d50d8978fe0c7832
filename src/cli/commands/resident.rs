use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::reconcile;
use crate::db;
use crate::db::pool::DbPool;
use crate::db::residents;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

/// Manage the resident registry and record returns from away mode.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Resident {
        add,
        name,
        room,
        list,
        ret,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(id) = add {
            let resident = residents::add(
                &pool.conn,
                id,
                name.as_deref().unwrap_or(""),
                room.as_deref().unwrap_or(""),
            )?;
            success(format!("Registered resident {}", resident.id));
            db::ttlog(
                &pool.conn,
                "resident_add",
                &resident.id,
                &format!("Registered (name='{}', room='{}')", resident.name, resident.room),
            )?;
        }

        if let Some(id) = ret {
            reconcile::return_from_away(&pool.conn, clock, id)?;
            success(format!(
                "Recorded return for {} as of {}; days from today on are no longer away",
                id,
                clock.today()
            ));
            db::ttlog(
                &pool.conn,
                "resident_return",
                id,
                &format!("Returned from away as of {}", clock.today()),
            )?;
        }

        if *list {
            let all = residents::list(&pool.conn)?;
            if all.is_empty() {
                info("No residents registered yet.");
                return Ok(());
            }

            let mut table = Table::new(vec!["Room", "Id", "Name", "Returned on"]);
            for r in &all {
                table.add_row(vec![
                    r.room.clone(),
                    r.id.clone(),
                    r.name.clone(),
                    r.returned_on.map(|d| d.to_string()).unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
            info(format!("{} resident(s) registered.", all.len()));
        }
    }

    Ok(())
}
