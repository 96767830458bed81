use crate::table::run_view;
use clap::{Args, Parser, Subcommand};
use fortia_grid::error::AppError;
use fortia_grid::views::ViewKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fortia-grid",
    about = "Filter, search, and sort the candidate and vacancy tables from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work with the candidates table
    Candidates(ViewArgs),
    /// Work with the vacancies table
    Vacancies(ViewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ViewArgs {
    /// CSV or JSON row snapshot; built-in demo rows are used when omitted
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Free-text search, matched without regard to case or accents
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Selector value as FIELD=VALUE; repeatable
    #[arg(long = "select", value_parser = parse_pair)]
    pub(crate) selections: Vec<(String, String)>,
    /// Sort key, e.g. `match` or `estado`
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Type the search one character at a time with this gap, exercising the debouncer
    #[arg(long)]
    pub(crate) typing_interval_ms: Option<u64>,
    /// Row action as ACTION=ROW_ID; repeatable
    #[arg(long = "action", value_parser = parse_pair)]
    pub(crate) actions: Vec<(String, String)>,
    /// Print a JSON report instead of a text table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Candidates(args) => run_view(ViewKind::Candidates, args).await,
        Command::Vacancies(args) => run_view(ViewKind::Vacancies, args).await,
    }
}

pub(crate) fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selector_pairs() {
        assert_eq!(
            parse_pair("status = Entrevista").expect("valid pair"),
            ("status".to_string(), "Entrevista".to_string())
        );
        assert_eq!(
            parse_pair("vacancy=").expect("empty value clears"),
            ("vacancy".to_string(), String::new())
        );
        assert!(parse_pair("status").is_err());
        assert!(parse_pair("=Nuevo").is_err());
    }

    #[test]
    fn cli_accepts_repeated_selectors() {
        let cli = Cli::try_parse_from([
            "fortia-grid",
            "vacancies",
            "--select",
            "state=ACTIVA",
            "--select",
            "dept=Finanzas",
            "--sort",
            "apps",
            "--json",
        ])
        .expect("arguments parse");

        let Command::Vacancies(args) = cli.command else {
            panic!("expected vacancies command");
        };
        assert_eq!(args.selections.len(), 2);
        assert_eq!(args.sort.as_deref(), Some("apps"));
        assert!(args.json);
    }
}
