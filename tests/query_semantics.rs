//! Query Semantics Tests
//!
//! End-to-end behavior of the query language over a loaded cellar:
//! - Parsed conditions print back in their written order
//! - Two or more group tokens select ALL
//! - Solving keeps partition order and never mutates the cellar
//! - Rejected lines are distinguishable and isolated

use std::fs;

use tempfile::TempDir;
use winecellar::executor::Query;
use winecellar::planner::{Operator, QueryErrorCode, QueryParser};
use winecellar::schema::{Column, ColumnCodes};
use winecellar::storage::{WineCellar, WineSample, WineType};

// =============================================================================
// Helper Functions
// =============================================================================

const HEADER: &str = "fixed acidity;volatile acidity;citric acid;residual sugar;chlorides;\
free sulfur dioxide;total sulfur dioxide;density;pH;sulphates;alcohol;quality";

fn setup_cellar() -> (TempDir, WineCellar) {
    let tmp = TempDir::new().unwrap();
    let red = tmp.path().join("red.csv");
    let white = tmp.path().join("white.csv");

    fs::write(
        &red,
        format!(
            "{}\n\
             7.4;0.7;0.0;1.9;0.076;11;34;0.9978;3.51;0.56;9.4;5\n\
             8.1;0.56;0.28;1.7;0.368;16;56;0.9968;3.11;1.28;9.3;5\n\
             10.2;0.42;0.57;3.4;0.07;4;10;0.9971;3.04;0.63;9.6;5\n\
             7.8;0.58;0.02;2.0;0.073;9;18;0.9968;3.36;0.57;9.5;7\n",
            HEADER
        ),
    )
    .unwrap();
    fs::write(
        &white,
        format!(
            "{}\n\
             7.0;0.27;0.36;20.7;0.045;45;170;1.001;3.0;0.45;8.8;6\n\
             8.1;0.28;0.4;6.9;0.05;30;97;0.9951;3.26;0.44;10.1;6\n\
             6.2;0.32;0.16;7.0;0.045;30;136;0.9949;3.18;0.47;9.6;6\n",
            HEADER
        ),
    )
    .unwrap();

    let cellar = WineCellar::load(&red, &white, b';').unwrap();
    (tmp, cellar)
}

fn ids(samples: &[&WineSample]) -> Vec<u32> {
    samples.iter().map(|s| s.id()).collect()
}

fn solve(cellar: &WineCellar, line: &str) -> Vec<u32> {
    let parsed = QueryParser::default().parse_line(line).unwrap();
    ids(&Query::bind(cellar, &parsed).solve())
}

// =============================================================================
// Parsing Tests
// =============================================================================

/// Conditions come back in written order with the typed operator.
#[test]
fn test_parse_prints_back_in_order() {
    let parsed = QueryParser::default()
        .parse_line("select red where fa > 7.0 and ph <= 3.4")
        .unwrap();

    assert_eq!(parsed.wine_type, WineType::Red);
    let rendered: Vec<String> = parsed.conditions.iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["Fixed Acidity > 7", "PH <= 3.4"]);
}

/// `select red or white` selects ALL.
#[test]
fn test_two_group_tokens_select_all() {
    let parsed = QueryParser::default()
        .parse_line("select red or white where qual >= 6")
        .unwrap();

    assert_eq!(parsed.wine_type, WineType::All);
    assert_eq!(parsed.conditions[0].column, Column::Quality);
    assert_eq!(parsed.conditions[0].operator, Operator::Ge);
}

/// A bad line never affects its neighbours.
#[test]
fn test_rejected_line_is_isolated() {
    let results = QueryParser::default().parse_lines([
        "select red where qual>6",
        "select red where qual=>6",
        "select white where ph<3.2",
        "select white ph<3.2",
    ]);

    assert!(results[0].is_ok());
    assert_eq!(
        results[1].as_ref().unwrap_err().code(),
        QueryErrorCode::UnknownOperator
    );
    assert!(results[2].is_ok());
    assert_eq!(
        results[3].as_ref().unwrap_err().code(),
        QueryErrorCode::MissingWhereClause
    );
}

/// Custom code tables change the accepted vocabulary.
#[test]
fn test_custom_codes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("codes.json");
    fs::write(
        &path,
        r#"{"fixed":"Fixed Acidity","volatile":"Volatile Acidity","citric":"Citric Acid",
            "sugar":"Residual Sugar","chlorides":"Chlorides","free_so2":"Free Sulfur Dioxide",
            "total_so2":"Total Sulfur Dioxide","density":"Density","ph":"pH",
            "sulphates":"Sulphates","alcohol":"Alcohol","quality":"Quality"}"#,
    )
    .unwrap();

    let parser = QueryParser::new(ColumnCodes::load(&path).unwrap());
    let parsed = parser.parse_line("select white where alcohol>10").unwrap();
    assert_eq!(parsed.conditions[0].column, Column::Alcohol);

    let err = parser.parse_line("select white where alc>10").unwrap_err();
    assert_eq!(err.code(), QueryErrorCode::UnknownColumn);
}

// =============================================================================
// Solve Tests
// =============================================================================

/// Red ids come first, white ids continue the sequence.
#[test]
fn test_ids_follow_load_order() {
    let (_tmp, cellar) = setup_cellar();
    assert_eq!(solve(&cellar, "select red where"), vec![1, 2, 3, 4]);
    assert_eq!(solve(&cellar, "select white where"), vec![5, 6, 7]);
}

/// Matches keep partition order across the red/white boundary.
#[test]
fn test_solve_preserves_order() {
    let (_tmp, cellar) = setup_cellar();
    assert_eq!(
        solve(&cellar, "select red, white where fa > 7.5"),
        vec![2, 3, 4, 6]
    );
}

/// Conditions combine with AND; `or` is only a separator.
#[test]
fn test_or_is_and() {
    let (_tmp, cellar) = setup_cellar();
    assert_eq!(solve(&cellar, "select red where qual<6 or ph>3.2"), vec![1]);
}

/// Conditions that cannot both hold give an empty result.
#[test]
fn test_contradiction_is_empty() {
    let (_tmp, cellar) = setup_cellar();
    assert!(solve(&cellar, "select white where alc > 10 and alc < 9").is_empty());
}

/// Solving twice gives the same answer and leaves the cellar intact.
#[test]
fn test_solve_is_repeatable() {
    let (_tmp, cellar) = setup_cellar();
    let before = cellar.samples(WineType::All).to_vec();

    let first = solve(&cellar, "select white where ph != 3.26");
    let second = solve(&cellar, "select white where ph != 3.26");

    assert_eq!(first, second);
    assert_eq!(first, vec![5, 7]);
    assert_eq!(cellar.samples(WineType::All), before.as_slice());
}
