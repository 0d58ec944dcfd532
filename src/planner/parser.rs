//! Query mini-language parser
//!
//! Grammar (case-insensitive):
//!
//! ```text
//! query          := ["select"] group-clause "where" condition-list
//! group-clause   := group-token | group-token group-token   ; two tokens => ALL
//! condition-list := condition {("and"|"or") condition}
//! condition      := column-code operator number
//! operator       := "=" | "<" | ">" | "<=" | ">=" | "<>"
//! ```
//!
//! `or` is read as `and`: there is no disjunction. Whitespace around an
//! operator is ignored, so `fa > 7` and `fa>7` are the same condition.
//! A line with only group tokens selects the whole partition.

use regex::Regex;

use super::ast::{Condition, Operator, ParsedQuery};
use super::errors::{QueryError, QueryResult};
use crate::schema::{Column, ColumnCodes};
use crate::storage::WineType;

/// Keywords that carry no meaning once the line is tokenized
const NOISE_KEYWORDS: [&str; 3] = ["select", "and", "or"];

const WHERE_KEYWORD: &str = "where";

/// Parses query lines and filter-form input into conditions
#[derive(Debug, Clone)]
pub struct QueryParser {
    codes: ColumnCodes,
    operator_spacing: Regex,
    fragment: Regex,
}

impl QueryParser {
    /// Creates a parser resolving column codes through `codes`
    pub fn new(codes: ColumnCodes) -> Self {
        Self {
            codes,
            operator_spacing: Regex::new(r"\s*(?P<op>[<>=!≠]+)\s*")
                .expect("operator spacing pattern is valid"),
            fragment: Regex::new(r"^(?P<code>[a-z_][a-z0-9_]*)(?P<op>[^a-z0-9_.+\-]+)(?P<value>.+)$")
                .expect("condition fragment pattern is valid"),
        }
    }

    /// Parses one query line.
    pub fn parse_line(&self, line: &str) -> QueryResult<ParsedQuery> {
        let tokens = self.tokenize(line);

        let Some(where_pos) = tokens.iter().position(|t| t == WHERE_KEYWORD) else {
            // Degenerate form: group tokens only, no conditions
            if !tokens.is_empty() && tokens.iter().all(|t| t.parse::<WineType>().is_ok()) {
                return Ok(ParsedQuery::new(resolve_wine_type(&tokens)?));
            }
            return Err(QueryError::missing_where());
        };

        let wine_type = resolve_wine_type(&tokens[..where_pos])?;
        let conditions = tokens[where_pos + 1..]
            .iter()
            .map(|fragment| self.parse_fragment(fragment))
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(ParsedQuery {
            wine_type,
            conditions,
        })
    }

    /// Parses many lines, keeping one result per line.
    ///
    /// A rejected line never affects its neighbours.
    pub fn parse_lines<I, S>(&self, lines: I) -> Vec<QueryResult<ParsedQuery>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.parse_line(line.as_ref()))
            .collect()
    }

    /// Parses a bare condition list such as `fa>7 and ph<3.2`
    pub fn parse_conditions(&self, text: &str) -> QueryResult<Vec<Condition>> {
        self.tokenize(text)
            .iter()
            .map(|fragment| self.parse_fragment(fragment))
            .collect()
    }

    /// Builds one condition from filter-form input.
    ///
    /// `column_name` is a full display name such as `"Fixed Acidity"`, not a
    /// code. Nothing is built unless all three inputs are valid.
    pub fn parse_filter(
        &self,
        column_name: &str,
        operator_symbol: &str,
        raw_value: &str,
    ) -> QueryResult<Condition> {
        let column =
            Column::from_name(column_name).ok_or_else(|| QueryError::unknown_column(column_name))?;
        let operator = Operator::from_symbol(operator_symbol)?;
        let threshold = parse_number(raw_value)?;
        Ok(Condition::with_operator(column, operator, threshold))
    }

    /// Lowercases, glues operators to their operands, splits on whitespace
    /// and commas, and drops noise keywords.
    fn tokenize(&self, line: &str) -> Vec<String> {
        let lowered = line.to_lowercase();
        let glued = self.operator_spacing.replace_all(&lowered, "$op");
        glued
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty() && !NOISE_KEYWORDS.contains(t))
            .map(str::to_string)
            .collect()
    }

    /// Splits `code<op>value` and resolves each part
    fn parse_fragment(&self, fragment: &str) -> QueryResult<Condition> {
        let caps = self
            .fragment
            .captures(fragment)
            .ok_or_else(|| QueryError::malformed_condition(fragment))?;

        let code = &caps["code"];
        let column = self
            .codes
            .resolve(code)
            .ok_or_else(|| QueryError::unknown_column(code))?;
        let operator = Operator::from_symbol(&caps["op"])?;
        let threshold = parse_number(&caps["value"])?;

        Ok(Condition::with_operator(column, operator, threshold))
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(ColumnCodes::default())
    }
}

/// Zero tokens or more than one select ALL; one token names the type
fn resolve_wine_type(tokens: &[String]) -> QueryResult<WineType> {
    match tokens {
        [single] => single
            .parse::<WineType>()
            .map_err(|_| QueryError::unknown_wine_type(single.as_str())),
        _ => Ok(WineType::All),
    }
}

/// Parses a finite decimal literal
fn parse_number(literal: &str) -> QueryResult<f64> {
    let trimmed = literal.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QueryError::malformed_number(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::QueryErrorCode;

    fn parser() -> QueryParser {
        QueryParser::default()
    }

    #[test]
    fn test_single_condition() {
        let q = parser().parse_line("select red where fa>7.0").unwrap();
        assert_eq!(q.wine_type, WineType::Red);
        assert_eq!(
            q.conditions,
            vec![Condition::with_operator(Column::FixedAcidity, Operator::Gt, 7.0)]
        );
    }

    #[test]
    fn test_two_group_tokens_select_all() {
        let q = parser().parse_line("select red white where ph<3.0").unwrap();
        assert_eq!(q.wine_type, WineType::All);

        let q = parser().parse_line("select red, white where ph<3.0").unwrap();
        assert_eq!(q.wine_type, WineType::All);
    }

    #[test]
    fn test_and_or_both_conjunctive() {
        let q = parser()
            .parse_line("select white where qual>=7 or alc>12.5 and ph<>3.2")
            .unwrap();
        assert_eq!(q.conditions.len(), 3);
        assert_eq!(q.conditions[0].operator, Operator::Ge);
        assert_eq!(q.conditions[1].column, Column::Alcohol);
        assert_eq!(q.conditions[2].operator, Operator::Ne);
    }

    #[test]
    fn test_case_and_spacing_insensitive() {
        let a = parser().parse_line("SELECT Red WHERE FA > 7.5 AND pH <= 3.3").unwrap();
        let b = parser().parse_line("select red where fa>7.5 and ph<=3.3").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_select_keyword_optional() {
        let q = parser().parse_line("white where qual=9").unwrap();
        assert_eq!(q.wine_type, WineType::White);
        assert_eq!(q.conditions[0].threshold, 9.0);
    }

    #[test]
    fn test_condition_order_preserved() {
        let q = parser().parse_line("select all where alc>10 and fa<8 and qual=6").unwrap();
        let columns: Vec<_> = q.conditions.iter().map(|c| c.column).collect();
        assert_eq!(columns, vec![Column::Alcohol, Column::FixedAcidity, Column::Quality]);
    }

    #[test]
    fn test_radix_point_and_sign() {
        let q = parser().parse_line("select red where ca>=.5 and fa>-1 and den<1").unwrap();
        assert_eq!(q.conditions[0].threshold, 0.5);
        assert_eq!(q.conditions[1].threshold, -1.0);
        assert_eq!(q.conditions[2].threshold, 1.0);
    }

    #[test]
    fn test_group_only_selects_everything() {
        let q = parser().parse_line("select red").unwrap();
        assert_eq!(q, ParsedQuery::new(WineType::Red));

        let q = parser().parse_line("select red white").unwrap();
        assert_eq!(q, ParsedQuery::new(WineType::All));

        let q = parser().parse_line("select white where").unwrap();
        assert!(q.conditions.is_empty());
    }

    #[test]
    fn test_missing_where() {
        let err = parser().parse_line("select red fa>7").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::MissingWhereClause);

        let err = parser().parse_line("   ").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::MissingWhereClause);
    }

    #[test]
    fn test_unknown_column_code() {
        let err = parser().parse_line("select red where xx>7").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::UnknownColumn);
        assert_eq!(err.token(), Some("xx"));
    }

    #[test]
    fn test_unknown_operator() {
        let err = parser().parse_line("select red where fa=>7").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::UnknownOperator);
        assert_eq!(err.token(), Some("=>"));
    }

    #[test]
    fn test_malformed_number() {
        let err = parser().parse_line("select red where fa>7.0.1").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::MalformedNumber);

        let err = parser().parse_line("select red where fa>seven").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::MalformedNumber);
        assert_eq!(err.token(), Some("seven"));

        let err = parser().parse_line("select red where fa>inf").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::MalformedNumber);
    }

    #[test]
    fn test_malformed_condition() {
        let err = parser().parse_line("select red where fa").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::MalformedCondition);

        let err = parser().parse_line("select red where fa>").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::MalformedCondition);
    }

    #[test]
    fn test_unknown_wine_type() {
        let err = parser().parse_line("select rose where fa>7").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::UnknownWineType);
    }

    #[test]
    fn test_parse_lines_isolates_failures() {
        let results = parser().parse_lines([
            "select red where fa>7",
            "select red fa>7",
            "select white where qual=9",
        ]);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1].as_ref().unwrap_err().code(),
            QueryErrorCode::MissingWhereClause
        );
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_custom_code_table() {
        let pairs = Column::ALL.map(|c| (format!("x_{}", c.default_code()), c));
        let parser = QueryParser::new(ColumnCodes::from_pairs(pairs).unwrap());

        let q = parser.parse_line("select red where x_fa>7").unwrap();
        assert_eq!(q.conditions[0].column, Column::FixedAcidity);
        assert!(parser.parse_line("select red where fa>7").is_err());
    }

    #[test]
    fn test_parse_conditions() {
        let conditions = parser().parse_conditions("fa > 7 and qual >= 6").unwrap();
        assert_eq!(conditions.len(), 2);
        assert!(parser().parse_conditions("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_filter() {
        let c = parser().parse_filter("Fixed Acidity", ">", "7.2").unwrap();
        assert_eq!(c, Condition::with_operator(Column::FixedAcidity, Operator::Gt, 7.2));

        let c = parser().parse_filter("free sulfur dioxide", "<>", " 30 ").unwrap();
        assert_eq!(c.column, Column::FreeSulfurDioxide);
        assert_eq!(c.threshold, 30.0);
    }

    #[test]
    fn test_parse_filter_errors() {
        let err = parser().parse_filter("Fixed Acidity", ">", "abc").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::MalformedNumber);

        let err = parser().parse_filter("fa", ">", "7").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::UnknownColumn);

        let err = parser().parse_filter("Alcohol", "~", "7").unwrap_err();
        assert_eq!(err.code(), QueryErrorCode::UnknownOperator);
    }
}
