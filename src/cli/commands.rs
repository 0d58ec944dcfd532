//! CLI command implementations
//!
//! Startup sequence shared by every command:
//! 1. Configuration load (defaults when no file is given)
//! 2. Log level
//! 3. Column-code table
//! 4. Dataset load (red, then white)
//!
//! Reports go to stdout, log lines to stderr.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::browser::report::{
    answer_questions, render_questions, render_sample_list, render_statistics,
};
use crate::browser::FilterSession;
use crate::executor::Query;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::planner::{QueryError, QueryParser};
use crate::schema::ColumnCodes;
use crate::storage::{WineCellar, WineType};

use super::args::{Cli, Command};
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_requests, write_error, write_response, write_text};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Red wine CSV (optional, default `resources/winequality-red.csv`)
    #[serde(default = "default_red_wine_path")]
    pub red_wine_path: PathBuf,

    /// White wine CSV (optional, default `resources/winequality-white.csv`)
    #[serde(default = "default_white_wine_path")]
    pub white_wine_path: PathBuf,

    /// Query file, one query per line (optional, default `resources/queries.txt`)
    #[serde(default = "default_queries_path")]
    pub queries_path: PathBuf,

    /// CSV field delimiter, exactly one ASCII character (default ";")
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// JSON table of query codes to column names (optional)
    #[serde(default)]
    pub column_codes_path: Option<PathBuf>,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_red_wine_path() -> PathBuf {
    PathBuf::from("resources/winequality-red.csv")
}
fn default_white_wine_path() -> PathBuf {
    PathBuf::from("resources/winequality-white.csv")
}
fn default_queries_path() -> PathBuf {
    PathBuf::from("resources/queries.txt")
}
fn default_delimiter() -> String {
    ";".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            red_wine_path: default_red_wine_path(),
            white_wine_path: default_white_wine_path(),
            queries_path: default_queries_path(),
            delimiter: default_delimiter(),
            column_codes_path: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` if given, otherwise validated defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        self.delimiter_byte()?;
        self.severity()?;
        Ok(())
    }

    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> CliResult<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(CliError::config_error(format!(
                "Invalid delimiter: '{}'. Must be exactly one ASCII character.",
                self.delimiter
            ))),
        }
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Column-code table from `column_codes_path`, or the built-in one
    pub fn column_codes(&self) -> CliResult<ColumnCodes> {
        match &self.column_codes_path {
            Some(path) => Ok(ColumnCodes::load(path)?),
            None => Ok(ColumnCodes::default()),
        }
    }

    /// Loads both datasets
    pub fn load_cellar(&self) -> CliResult<WineCellar> {
        let cellar = WineCellar::load(
            &self.red_wine_path,
            &self.white_wine_path,
            self.delimiter_byte()?,
        )?;

        for (wine_type, path) in [
            (WineType::Red, &self.red_wine_path),
            (WineType::White, &self.white_wine_path),
        ] {
            let samples = cellar.count(wine_type).to_string();
            let path = path.display().to_string();
            log_event_with_fields(
                Event::DatasetLoaded,
                &[
                    ("path", path.as_str()),
                    ("samples", samples.as_str()),
                    ("wine_type", wine_type.as_str()),
                ],
            );
        }

        Ok(cellar)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(cli.config.as_deref())?;
    Logger::set_min_severity(config.severity()?);
    run_command(cli.command, &config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &Config) -> CliResult<()> {
    match cmd {
        Command::Query => query(config),
        Command::Questions => questions(config),
        Command::Stats {
            wine_type,
            where_clause,
        } => stats(config, wine_type, where_clause.as_deref()),
        Command::Browse => browse(config),
    }
}

/// Runs every query in the query file
pub fn query(config: &Config) -> CliResult<()> {
    let parser = QueryParser::new(config.column_codes()?);
    let cellar = config.load_cellar()?;

    let text = fs::read_to_string(&config.queries_path).map_err(|e| {
        CliError::io_error(format!(
            "Failed to read query file {}: {}",
            config.queries_path.display(),
            e
        ))
    })?;

    write_text(&run_queries(&cellar, &parser, &text)?)
}

/// Parses and solves each non-blank line of `text`.
///
/// A rejected line is reported in place and the rest still run. Fails
/// only when there is no query at all.
pub fn run_queries(cellar: &WineCellar, parser: &QueryParser, text: &str) -> CliResult<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(CliError::io_error("Query file is empty"));
    }

    let count = lines.len().to_string();
    log_event_with_fields(Event::QueryFileRead, &[("queries", count.as_str())]);

    let mut blocks = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let number = (i + 1).to_string();
        let body = match parser.parse_line(line) {
            Ok(parsed) => {
                let conditions = parsed.conditions.len().to_string();
                log_event_with_fields(
                    Event::QueryParsed,
                    &[
                        ("conditions", conditions.as_str()),
                        ("query", number.as_str()),
                        ("wine_type", parsed.wine_type.as_str()),
                    ],
                );

                let query = Query::bind(cellar, &parsed);
                let matches = query.solve();

                let matched = matches.len().to_string();
                let source = query.source_len().to_string();
                log_event_with_fields(
                    Event::QuerySolved,
                    &[
                        ("matched", matched.as_str()),
                        ("query", number.as_str()),
                        ("source", source.as_str()),
                    ],
                );
                render_sample_list(&matches)
            }
            Err(err) => {
                log_event_with_fields(
                    Event::QueryRejected,
                    &[
                        ("code", err.code().code()),
                        ("line", *line),
                        ("message", err.message()),
                        ("query", number.as_str()),
                    ],
                );
                err.to_string()
            }
        };
        blocks.push(format!("QUERY #{}: {}\n{}", number, line, body));
    }

    Ok(blocks.join("\n\n"))
}

/// Answers the fixed console questions
pub fn questions(config: &Config) -> CliResult<()> {
    let cellar = config.load_cellar()?;
    write_text(&render_questions(&answer_questions(&cellar)))
}

/// Prints the statistics table for a filtered partition
pub fn stats(config: &Config, wine_type: WineType, where_clause: Option<&str>) -> CliResult<()> {
    let parser = QueryParser::new(config.column_codes()?);
    let cellar = config.load_cellar()?;
    write_text(&render_stats(&cellar, &parser, wine_type, where_clause)?)
}

/// Statistics table text for `wine_type` narrowed by `where_clause`
pub fn render_stats(
    cellar: &WineCellar,
    parser: &QueryParser,
    wine_type: WineType,
    where_clause: Option<&str>,
) -> CliResult<String> {
    let mut session = FilterSession::new(parser.clone());
    session.select_wine_type(wine_type);
    if let Some(clause) = where_clause {
        for condition in parser.parse_conditions(clause)? {
            session.push_condition(condition);
        }
    }
    Ok(render_statistics(&session.view(cellar)))
}

/// Runs the filter-browser loop on stdin/stdout
pub fn browse(config: &Config) -> CliResult<()> {
    let parser = QueryParser::new(config.column_codes()?);
    let cellar = config.load_cellar()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    browse_loop(
        &cellar,
        FilterSession::new(parser),
        stdin.lock(),
        &mut stdout.lock(),
    )
}

/// Answers one response line per request line.
///
/// Bad requests and rejected filters are answered with an error line and
/// the loop continues. An input read failure ends it.
pub fn browse_loop<R: BufRead, W: Write>(
    cellar: &WineCellar,
    mut session: FilterSession,
    reader: R,
    writer: &mut W,
) -> CliResult<()> {
    for request in read_requests(reader) {
        let request = match request {
            Ok(request) => request,
            Err(e) if e.code() == &CliErrorCode::IoError => return Err(e),
            Err(e) => {
                write_error(writer, e.code_str(), e.message())?;
                continue;
            }
        };

        match handle_request(&mut session, cellar, request) {
            Ok(data) => write_response(writer, data)?,
            Err(failure) => write_error(writer, failure.code(), failure.message())?,
        }
    }
    Ok(())
}

/// One browse request, tagged by `action`
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum BrowseRequest {
    AddFilter {
        column: String,
        operator: String,
        value: Value,
    },
    Clear,
    Select {
        wine_type: String,
    },
    Show,
}

/// Why a browse request was not applied
enum RequestFailure {
    Cli(CliError),
    Query(QueryError),
}

impl RequestFailure {
    fn code(&self) -> &'static str {
        match self {
            RequestFailure::Cli(e) => e.code_str(),
            RequestFailure::Query(e) => e.code().code(),
        }
    }

    fn message(&self) -> &str {
        match self {
            RequestFailure::Cli(e) => e.message(),
            RequestFailure::Query(e) => e.message(),
        }
    }
}

impl From<CliError> for RequestFailure {
    fn from(e: CliError) -> Self {
        RequestFailure::Cli(e)
    }
}

impl From<QueryError> for RequestFailure {
    fn from(e: QueryError) -> Self {
        RequestFailure::Query(e)
    }
}

fn handle_request(
    session: &mut FilterSession,
    cellar: &WineCellar,
    request: Value,
) -> Result<Value, RequestFailure> {
    let request: BrowseRequest = serde_json::from_value(request).map_err(CliError::from)?;

    match request {
        BrowseRequest::AddFilter {
            column,
            operator,
            value,
        } => {
            let raw_value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            let added = session.add_filter(&column, &operator, &raw_value)?;
            Ok(json!({ "added": added, "filters": session.filters() }))
        }
        BrowseRequest::Clear => {
            session.clear_filters();
            Ok(json!({ "filters": session.filters() }))
        }
        BrowseRequest::Select { wine_type } => {
            let wine_type: WineType = wine_type
                .parse()
                .map_err(|_| QueryError::unknown_wine_type(&wine_type))?;
            session.select_wine_type(wine_type);
            Ok(json!({ "wine_type": wine_type }))
        }
        BrowseRequest::Show => {
            let view = session.view(cellar);
            let mut data = serde_json::to_value(&view).map_err(CliError::from)?;
            data["report"] = Value::String(render_statistics(&view));
            Ok(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "\"fixed acidity\";\"volatile acidity\";\"citric acid\";\"residual sugar\";\
\"chlorides\";\"free sulfur dioxide\";\"total sulfur dioxide\";\"density\";\"pH\";\"sulphates\";\
\"alcohol\";\"quality\"";

    fn write_datasets(dir: &TempDir) -> Config {
        let red = dir.path().join("red.csv");
        let white = dir.path().join("white.csv");
        fs::write(
            &red,
            format!(
                "{}\n7.4;0.7;0;1.9;0.076;11;34;0.9978;3.51;0.56;9.4;5\n\
                 7.8;0.88;0;2.6;0.098;25;67;0.9968;3.2;0.68;9.8;5\n\
                 11.2;0.28;0.56;1.9;0.075;17;60;0.998;3.16;0.58;9.8;6\n",
                HEADER
            ),
        )
        .unwrap();
        fs::write(
            &white,
            format!(
                "{}\n7;0.27;0.36;20.7;0.045;45;170;1.001;3;0.45;8.8;6\n\
                 6.3;0.3;0.34;1.6;0.049;14;132;0.994;3.3;0.49;9.5;6\n",
                HEADER
            ),
        )
        .unwrap();

        Config {
            red_wine_path: red,
            white_wine_path: white,
            queries_path: dir.path().join("queries.txt"),
            ..Config::default()
        }
    }

    fn browse_lines(cellar: &WineCellar, input: &str) -> Vec<Value> {
        let mut out = Vec::new();
        browse_loop(cellar, FilterSession::default(), input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    // =========================================================================
    // Config
    // =========================================================================

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("winecellar.json");
        fs::write(&config_path, "{}").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.red_wine_path, PathBuf::from("resources/winequality-red.csv"));
        assert_eq!(config.queries_path, PathBuf::from("resources/queries.txt"));
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert_eq!(config.severity().unwrap(), Severity::Info);
        assert!(config.column_codes_path.is_none());
    }

    #[test]
    fn test_config_rejects_long_delimiter() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("winecellar.json");
        fs::write(&config_path, json!({ "delimiter": ";;" }).to_string()).unwrap();

        let err = Config::load(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_rejects_unknown_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("winecellar.json");
        fs::write(&config_path, json!({ "log_level": "loud" }).to_string()).unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::resolve(Some(Path::new("/nonexistent/winecellar.json"))).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
        assert!(Config::resolve(None).is_ok());
    }

    #[test]
    fn test_load_cellar_missing_dataset() {
        let config = Config {
            red_wine_path: PathBuf::from("/nonexistent/red.csv"),
            ..Config::default()
        };
        assert_eq!(config.load_cellar().unwrap_err().code(), &CliErrorCode::LoadError);
    }

    // =========================================================================
    // Query file
    // =========================================================================

    #[test]
    fn test_run_queries_reports_each_line() {
        let temp_dir = TempDir::new().unwrap();
        let cellar = write_datasets(&temp_dir).load_cellar().unwrap();
        let parser = QueryParser::default();

        let text = "select red where qual>5\n\nselect white where fa>seven\nselect red or white where ph<3.2\n";
        let report = run_queries(&cellar, &parser, text).unwrap();
        let blocks: Vec<&str> = report.split("\n\n").collect();

        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("QUERY #1: select red where qual>5\n1 wine sample matches"));
        assert!(blocks[0].contains("Sample #3: RED wine"));
        assert!(blocks[1].starts_with("QUERY #2: select white where fa>seven\n"));
        assert!(blocks[1].contains("WINE_QUERY_MALFORMED_NUMBER"));
        assert!(blocks[2].contains("2 wine samples match your query."));
        assert!(blocks[2].contains("Sample #3: RED wine"));
        assert!(blocks[2].contains("Sample #4: WHITE wine"));
    }

    #[test]
    fn test_run_queries_empty_file() {
        let cellar = WineCellar::default();
        let err = run_queries(&cellar, &QueryParser::default(), "\n  \n").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::IoError);
    }

    // =========================================================================
    // Stats
    // =========================================================================

    #[test]
    fn test_render_stats_with_where() {
        let temp_dir = TempDir::new().unwrap();
        let cellar = write_datasets(&temp_dir).load_cellar().unwrap();
        let parser = QueryParser::default();

        let text = render_stats(&cellar, &parser, WineType::Red, Some("alc>9.5")).unwrap();
        assert!(text.contains("Maximum\t11.20\t"));
        assert!(text.ends_with("Showing 2 out of 3 samples."));

        let err = render_stats(&cellar, &parser, WineType::All, Some("xx>1")).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidQuery);
    }

    // =========================================================================
    // Browse
    // =========================================================================

    #[test]
    fn test_browse_session_flow() {
        let temp_dir = TempDir::new().unwrap();
        let cellar = write_datasets(&temp_dir).load_cellar().unwrap();

        let input = r#"{"action":"add_filter","column":"Alcohol","operator":">","value":"9.5"}
{"action":"add_filter","column":"Fixed Acidity","operator":">","value":"abc"}
{"action":"show"}
{"action":"select","wine_type":"white"}
{"action":"show"}
{"action":"clear"}
{"action":"show"}
"#;
        let responses = browse_lines(&cellar, input);
        assert_eq!(responses.len(), 7);

        assert_eq!(responses[0]["status"], "ok");
        assert_eq!(responses[0]["data"]["filters"].as_array().unwrap().len(), 1);

        assert_eq!(responses[1]["status"], "error");
        assert_eq!(responses[1]["code"], "WINE_QUERY_MALFORMED_NUMBER");

        assert_eq!(responses[2]["data"]["shown"], 2);
        assert_eq!(responses[2]["data"]["total"], 5);
        assert_eq!(responses[2]["data"]["filters"].as_array().unwrap().len(), 1);

        assert_eq!(responses[3]["data"]["wine_type"], "white");

        assert_eq!(responses[4]["data"]["shown"], 0);
        assert!(responses[4]["data"]["statistics"].is_null());

        assert_eq!(responses[6]["data"]["shown"], 2);
        assert_eq!(responses[6]["data"]["total"], 2);
    }

    #[test]
    fn test_browse_continues_after_bad_encoding() {
        let temp_dir = TempDir::new().unwrap();
        let cellar = write_datasets(&temp_dir).load_cellar().unwrap();

        let input: &[u8] = b"{\"action\":\"show\"}\n\xff\n{\"action\":\"show\"}\n";
        let mut out = Vec::new();
        browse_loop(&cellar, FilterSession::default(), input, &mut out).unwrap();

        let responses: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["status"], "ok");
        assert_eq!(responses[1]["code"], "WINE_CLI_INVALID_REQUEST");
        assert_eq!(responses[2]["data"]["shown"], 5);
    }

    #[test]
    fn test_browse_numeric_value_and_bad_requests() {
        let temp_dir = TempDir::new().unwrap();
        let cellar = write_datasets(&temp_dir).load_cellar().unwrap();

        let input = r#"{"action":"add_filter","column":"Quality","operator":">=","value":6}
not json
{"action":"dance"}
{"action":"select","wine_type":"rose"}
{"action":"show"}
"#;
        let responses = browse_lines(&cellar, input);

        assert_eq!(responses[0]["status"], "ok");
        assert_eq!(responses[1]["code"], "WINE_CLI_INVALID_REQUEST");
        assert_eq!(responses[2]["code"], "WINE_CLI_INVALID_REQUEST");
        assert_eq!(responses[3]["code"], "WINE_QUERY_UNKNOWN_WINE_TYPE");
        assert_eq!(responses[4]["data"]["shown"], 3);
        assert!(responses[4]["data"]["report"]
            .as_str()
            .unwrap()
            .ends_with("Showing 3 out of 5 samples."));
    }
}
