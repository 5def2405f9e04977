//! LSG Report - one-shot inventory summary on stdout
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin lsg_report -- [--genotype NAME] [--status STATUS] [--bench BENCH] [--limit N] [--json]
//! ```
//!
//! `--status` accepts `Active`, `Cut Back` or `Killed` (case-insensitive).
//! Each filter defaults to `All`. Same environment variables as `lsg_dashboard`;
//! logging defaults to `warn` on stderr.

use {
    chrono::Local,
    lsg_inventory::{
        inventory::{FilterSelection, PlantStatus, Selection},
        report, Config, Dashboard,
    },
    std::{env, time::Instant},
};

#[derive(Debug, Default)]
struct ReportArgs {
    filters: FilterSelection,
    limit: Option<usize>,
    json: bool,
}

/// Value following `flag`; a flag given without a value is an error
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, String> {
    match args.iter().position(|x| x == flag) {
        None => Ok(None),
        Some(idx) => match args.get(idx + 1) {
            Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
            _ => Err(format!("{} expects a value", flag)),
        },
    }
}

fn parse_args(args: &[String]) -> Result<ReportArgs, String> {
    let mut parsed = ReportArgs {
        json: args.iter().any(|x| x == "--json"),
        ..Default::default()
    };

    if let Some(genotype) = flag_value(args, "--genotype")? {
        parsed.filters.genotype = Selection::parse(genotype).unwrap_or(Selection::All);
    }
    if let Some(status) = flag_value(args, "--status")? {
        parsed.filters.status = Selection::<PlantStatus>::parse(status)?;
    }
    if let Some(bench) = flag_value(args, "--bench")? {
        parsed.filters.bench = Selection::parse(bench).unwrap_or(Selection::All);
    }
    if let Some(limit) = flag_value(args, "--limit")? {
        parsed.limit = Some(
            limit
                .parse()
                .map_err(|_| format!("--limit expects a number, got '{}'", limit))?,
        );
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let parsed = parse_args(&args)?;

    let config = Config::from_env();
    config.log_summary();

    let mut dashboard = Dashboard::from_config(&config);
    dashboard.filters = parsed.filters;
    dashboard.ensure_fresh(Instant::now()).await;

    let view = dashboard.view(Local::now().naive_local());
    if parsed.json {
        println!("{}", report::render_json(&view)?);
    } else {
        print!("{}", report::render_text(&view, parsed.limit));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("lsg_report")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args(&["--status", "cut back", "--bench", "4", "--json", "--limit", "20"])).unwrap();
        assert_eq!(parsed.filters.status, Selection::Only(PlantStatus::CutBack));
        assert_eq!(parsed.filters.bench, Selection::Only("4".to_string()));
        assert_eq!(parsed.filters.genotype, Selection::All);
        assert_eq!(parsed.limit, Some(20));
        assert!(parsed.json);
    }

    #[test]
    fn test_parse_args_defaults_and_errors() {
        let parsed = parse_args(&args(&["--genotype", "All"])).unwrap();
        assert!(parsed.filters.is_unfiltered());
        assert!(!parsed.json);

        assert!(parse_args(&args(&["--status", "dormant"])).is_err());
        assert!(parse_args(&args(&["--limit", "many"])).is_err());
    }

    #[test]
    fn test_parse_args_missing_values() {
        assert_eq!(
            parse_args(&args(&["--json", "--status"])).unwrap_err(),
            "--status expects a value"
        );
        assert_eq!(
            parse_args(&args(&["--limit"])).unwrap_err(),
            "--limit expects a value"
        );
        assert_eq!(
            parse_args(&args(&["--bench", "--json"])).unwrap_err(),
            "--bench expects a value"
        );
    }
}
