//! Execute compiled WHERE clauses against an in-memory SQLite database.
//!
//! SQLite accepts both `"double quoted"` and `[bracketed]` identifiers, so the
//! output of either dialect can be run and checked for the rows it selects.

use chrono::NaiveDate;
use cond_sql::{AnyDialect, ConditionBuilder, Group, LogicalOperator, to_where_clause};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE OCRD (
            CardCode TEXT PRIMARY KEY,
            CardName TEXT NOT NULL,
            CardType TEXT NOT NULL,
            Balance REAL NOT NULL,
            U_Active TEXT NOT NULL,
            CreateDate TEXT NOT NULL,
            U_Region TEXT
        );
        INSERT INTO OCRD VALUES ('C001', 'Acme', 'C', 150.0, 'Y', '20240105', 'EU');
        INSERT INTO OCRD VALUES ('C002', 'O''Brien Ltd', 'C', 0.0, 'N', '20240307', NULL);
        INSERT INTO OCRD VALUES ('S001', 'Supply Co', 'S', -20.5, 'Y', '20231231', 'NA');
        INSERT INTO OCRD VALUES ('C003', 'Zeta', 'C', 9000.0, 'Y', '20240601', 'APAC');

        CREATE TABLE ORDR (DocEntry INTEGER PRIMARY KEY, CardCode TEXT NOT NULL);
        INSERT INTO ORDR VALUES (1, 'C001');",
    )
    .unwrap();
    conn
}

/// Card codes selected by `tree`, checked to be identical for both dialects.
fn select_codes(conn: &Connection, tree: &Group) -> Vec<String> {
    let mut results = Vec::new();
    for dialect in [AnyDialect::Hana, AnyDialect::SqlServer] {
        let clause = to_where_clause(tree, dialect).unwrap();
        let sql = format!("SELECT CardCode FROM OCRD {clause} ORDER BY CardCode");
        let mut stmt = conn
            .prepare(&sql)
            .unwrap_or_else(|e| panic!("{sql}: {e}"));
        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        results.push(codes);
    }
    assert_eq!(results[0], results[1], "dialects disagree");
    results.swap_remove(0)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_quoted_string_value() {
    let conn = setup();
    let tree = ConditionBuilder::new()
        .equals("CardName", "O'Brien Ltd")
        .build()
        .unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C002"]);
}

#[test]
fn test_boolean_flag() {
    let conn = setup();
    let active = ConditionBuilder::new().equals("U_Active", true).build().unwrap();
    assert_eq!(select_codes(&conn, &active), vec!["C001", "C003", "S001"]);

    let inactive = ConditionBuilder::new().equals("U_Active", false).build().unwrap();
    assert_eq!(select_codes(&conn, &inactive), vec!["C002"]);
}

#[test]
fn test_date_range() {
    let conn = setup();
    let tree = ConditionBuilder::new()
        .between("CreateDate", date(2024, 1, 1), date(2024, 3, 31))
        .build()
        .unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C001", "C002"]);
}

#[test]
fn test_nested_or_group() {
    let conn = setup();
    let tree = ConditionBuilder::new()
        .equals("CardType", "C")
        .group(LogicalOperator::Or, |g| {
            g.greater_than("Balance", 1000).is_null("U_Region")
        })
        .build()
        .unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C002", "C003"]);
}

#[test]
fn test_in_lists() {
    let conn = setup();
    let tree = ConditionBuilder::new()
        .in_list("U_Region", ["EU", "NA", "EU"])
        .build()
        .unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C001", "S001"]);

    let tree = ConditionBuilder::new()
        .not_in_list("CardCode", ["C001", "C002"])
        .build()
        .unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C003", "S001"]);
}

#[test]
fn test_empty_in_lists() {
    let conn = setup();
    let none: Vec<&str> = Vec::new();

    let tree = ConditionBuilder::new().in_list("CardCode", none.clone()).build().unwrap();
    assert!(select_codes(&conn, &tree).is_empty());

    let tree = ConditionBuilder::new().not_in_list("CardCode", none).build().unwrap();
    assert_eq!(select_codes(&conn, &tree).len(), 4);
}

#[test]
fn test_exists_subquery() {
    let conn = setup();
    let subquery = "SELECT 1 FROM ORDR WHERE ORDR.CardCode = OCRD.CardCode";

    let tree = ConditionBuilder::new().exists(subquery).build().unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C001"]);

    let tree = ConditionBuilder::new().not_exists(subquery).build().unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C002", "C003", "S001"]);
}

#[test]
fn test_like_and_not_like() {
    let conn = setup();
    let tree = ConditionBuilder::new()
        .like("CardCode", "C%")
        .not_like("CardName", "%Ltd")
        .build()
        .unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C001", "C003"]);
}

#[test]
fn test_null_literal_matches_nothing() {
    let conn = setup();
    let tree = ConditionBuilder::new()
        .equals("U_Region", None::<&str>)
        .build()
        .unwrap();
    assert!(select_codes(&conn, &tree).is_empty());

    let tree = ConditionBuilder::new().is_null("U_Region").build().unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C002"]);
}

#[test]
fn test_empty_tree_selects_all() {
    let conn = setup();
    let tree = ConditionBuilder::new().or_group(|g| g).build().unwrap();
    assert_eq!(select_codes(&conn, &tree).len(), 4);
}

#[test]
fn test_negative_decimal_comparison() {
    let conn = setup();
    let tree = ConditionBuilder::with_operator(LogicalOperator::Or)
        .less_than("Balance", -20)
        .equals("Balance", 0.0)
        .build()
        .unwrap();
    assert_eq!(select_codes(&conn, &tree), vec!["C002", "S001"]);
}
