mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn script_cmd() -> Command {
    let mut cmd = Command::cargo_bin("spendview_cli").unwrap();
    cmd.env("SPENDVIEW_CLI_SCRIPT", "1")
        .env("SPENDVIEW_HOME", common::temp_home())
        .env("SPENDVIEW_NOW", common::NOW)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = common::temp_home();
    let file = home.join("expenses.json");
    let input = format!(
        "add 120 Food --note \"Lunch with team\"\n\
         add 40 Transport --date 2024-03-13 --note bus\n\
         add 15 Other\n\
         show\n\
         save {}\n\
         exit\n",
        file.display()
    );

    script_cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Expense added"))
        .stdout(contains("Lunch with team"))
        .stdout(contains("—"))
        .stdout(contains("Showing 3 of 3 expenses. Total ฿175.00."))
        .stdout(contains("Saved 3 expenses"));

    let json = std::fs::read_to_string(&file).unwrap();
    assert!(json.contains("\"Lunch with team\""));
}

#[test]
fn invalid_amounts_are_reported_without_aborting() {
    script_cmd()
        .write_stdin("add 0 Food\nadd abc\nadd 5 Food\nshow\n")
        .assert()
        .success()
        .stdout(contains("Please enter a valid amount."))
        .stdout(contains("Showing 1 of 1 expenses."));
}

#[test]
fn filters_surface_applies_category_before_search() {
    let input = "add 3 Food --note coffee\n\
                 add 2 Transport --note bus\n\
                 surface filters\n\
                 category Food\n\
                 search bus\n\
                 show\n\
                 search\n\
                 summary\n";

    script_cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("No expenses match the current selections."))
        .stdout(contains("Showing 0 of 2 expenses. Total ฿0.00."))
        .stdout(contains("Top category: Food (฿3.00)"));
}

#[test]
fn dashboard_warns_that_it_ignores_predicate_filters() {
    script_cmd()
        .write_stdin("add 9 Food\ncategory Bills\nshow\n")
        .assert()
        .success()
        .stdout(contains("The dashboard ignores the category filter"))
        .stdout(contains("Showing 1 of 1 expenses."));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    script_cmd()
        .write_stdin("shwo\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `shwo`"))
        .stdout(contains("Suggestion: `show`?"));
}

#[test]
fn load_reads_snapshots_written_elsewhere() {
    let home = common::temp_home();
    let file = home.join("external.json");
    std::fs::write(
        &file,
        r#"[{"id":"abc12345xyz","amount":"50","category":"Bills","date":"2024-03-05"},
            {"id":"def67890xyz","date":"2024-03-06"}]"#,
    )
    .unwrap();

    script_cmd()
        .write_stdin(format!("load {}\nshow\ntrend\ncategories\n", file.display()))
        .assert()
        .success()
        .stdout(contains("Loaded 2 expenses"))
        .stdout(contains("Uncategorized"))
        .stdout(contains("2024-03-05").and(contains("#")))
        .stdout(contains("Showing 2 of 2 expenses. Total ฿50.00."));
}
