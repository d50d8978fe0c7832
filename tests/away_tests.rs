mod common;

use common::{init_db_with_residents, mw, setup_test_db};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_away_forces_no_meals_for_every_covered_day() {
    let db = setup_test_db("away_forces");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Away mode set for r1 from 2024-06-01 to 2024-06-03 (3 day(s) forced to no meals)",
        ));

    for date in ["2024-06-01", "2024-06-02", "2024-06-03"] {
        mw().args(["--db", &db, "day", "r1", date])
            .assert()
            .success()
            .stdout(predicate::str::contains("Away     : yes"))
            .stdout(predicate::str::contains("Breakfast: no"))
            .stdout(predicate::str::contains("Supper   : no"));
    }

    fs::remove_file(&db).ok();
}

#[test]
fn test_away_overrides_prior_confirmations() {
    let db = setup_test_db("away_overrides");
    init_db_with_residents(&db);

    mw().args([
        "--db", &db, "confirm", "r1", "2024-06-02", "--breakfast", "--supper",
    ])
    .assert()
    .success();

    mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-03"])
        .assert()
        .success();

    mw().args(["--db", &db, "day", "r1", "2024-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Away     : yes"))
        .stdout(predicate::str::contains("Breakfast: no"));

    fs::remove_file(&db).ok();
}

#[test]
fn test_confirm_inside_away_period_is_rejected() {
    let db = setup_test_db("away_rejects_confirm");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-03"])
        .assert()
        .success();

    mw().args(["--db", &db, "confirm", "r1", "2024-06-02", "--breakfast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "2024-06-02 falls inside an away period",
        ));

    // the forced record is untouched
    mw().args(["--db", &db, "day", "r1", "2024-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Away     : yes"))
        .stdout(predicate::str::contains("Breakfast: no"));

    fs::remove_file(&db).ok();
}

#[test]
fn test_confirm_just_outside_away_period_succeeds() {
    let db = setup_test_db("away_boundary");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-03"])
        .assert()
        .success();

    mw().args(["--db", &db, "confirm", "r1", "2024-06-04", "--breakfast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("breakfast=yes"));

    fs::remove_file(&db).ok();
}

#[test]
fn test_away_inverted_range_fails() {
    let db = setup_test_db("away_inverted");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-03", "2024-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid date range: 2024-06-03 is after 2024-06-01",
        ));

    fs::remove_file(&db).ok();
}

#[test]
fn test_away_single_day_range() {
    let db = setup_test_db("away_single");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-05", "2024-06-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 day(s) forced to no meals"));

    fs::remove_file(&db).ok();
}

#[test]
fn test_away_rerun_same_range_is_safe() {
    let db = setup_test_db("away_rerun");
    init_db_with_residents(&db);

    for _ in 0..2 {
        mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-03"])
            .assert()
            .success();
    }

    mw().args(["--db", &db, "day", "r1", "2024-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Away     : yes"));

    fs::remove_file(&db).ok();
}

#[test]
fn test_away_list_shows_declared_periods_newest_first() {
    let db = setup_test_db("away_list");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-03"])
        .assert()
        .success();
    mw().args(["--db", &db, "away", "r1", "2024-07-10", "2024-07-12"])
        .assert()
        .success();

    let out = mw()
        .args(["--db", &db, "away", "r1", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 period(s) declared."));

    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    let july = stdout.find("2024-07-10").unwrap();
    let june = stdout.find("2024-06-01").unwrap();
    assert!(july < june, "periods must be listed newest first");

    fs::remove_file(&db).ok();
}

#[test]
fn test_away_list_marks_period_covering_today() {
    let db = setup_test_db("away_list_today");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-03"])
        .assert()
        .success();
    mw().args(["--db", &db, "away", "r1", "2024-07-10", "2024-07-12"])
        .assert()
        .success();

    let out = mw()
        .args(["--db", &db, "--now", "2024-06-02 09:00", "away", "r1", "--list"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&out.get_output().stdout).to_string();
    let june_line = stdout
        .lines()
        .find(|l| l.contains("2024-06-01"))
        .unwrap();
    let july_line = stdout
        .lines()
        .find(|l| l.contains("2024-07-10"))
        .unwrap();
    assert!(june_line.contains("yes"));
    assert!(!july_line.contains("yes"));

    fs::remove_file(&db).ok();
}

#[test]
fn test_away_list_empty_registry_message() {
    let db = setup_test_db("away_list_empty");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No away periods declared for r1."));

    fs::remove_file(&db).ok();
}

#[test]
fn test_away_without_dates_or_list_is_a_usage_error() {
    let db = setup_test_db("away_usage");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1"]).assert().failure();

    fs::remove_file(&db).ok();
}

#[test]
fn test_return_clears_away_from_today_on() {
    let db = setup_test_db("away_return");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-10"])
        .assert()
        .success();

    mw().args([
        "--db", &db, "--now", "2024-06-05 10:00", "resident", "--return", "r1",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Recorded return for r1 as of 2024-06-05"));

    // the day view releases the forced state from the return date on
    mw().args(["--db", &db, "day", "r1", "2024-06-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Away     : no"));

    // past days stay as recorded
    mw().args(["--db", &db, "day", "r1", "2024-06-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Away     : yes"));

    // days from the return date on are writable again
    mw().args([
        "--db", &db, "--now", "2024-06-05 10:00", "confirm", "r1", "2024-06-06", "--breakfast",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("breakfast=yes"));

    mw().args(["--db", &db, "day", "r1", "2024-06-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Away     : no"));

    fs::remove_file(&db).ok();
}

#[test]
fn test_new_away_period_after_return_counts_in_full() {
    let db = setup_test_db("away_after_return");
    init_db_with_residents(&db);

    mw().args(["--db", &db, "away", "r1", "2024-06-01", "2024-06-10"])
        .assert()
        .success();
    mw().args([
        "--db", &db, "--now", "2024-06-05 10:00", "resident", "--return", "r1",
    ])
    .assert()
    .success();

    mw().args(["--db", &db, "away", "r1", "2024-06-08", "2024-06-09"])
        .assert()
        .success();

    mw().args(["--db", &db, "confirm", "r1", "2024-06-08", "--supper"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("falls inside an away period"));

    fs::remove_file(&db).ok();
}
