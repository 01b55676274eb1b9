//! `figures` subcommand: renders the six figures for one selection to stdout
//! as JSON, without starting a server.

use crate::config::Dashboard;
use crate::dataset::Dataset;
use crate::interaction::{compute_all_figures, SelectionEvent};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use ringlog::*;

use std::io::Write;
use std::path::PathBuf;

pub struct Config {
    pub dataset: PathBuf,
    pub event: SelectionEvent,
    pub pretty: bool,
    pub verbose: u8,
}

impl TryFrom<ArgMatches> for Config {
    type Error = String;

    fn try_from(args: ArgMatches) -> Result<Self, String> {
        let dataset = args
            .get_one::<PathBuf>("DATASET")
            .cloned()
            .ok_or("a dataset file is required")?;

        let year = args
            .get_one::<i32>("YEAR")
            .copied()
            .unwrap_or(Dashboard::default().default_year);

        let event = match (
            args.get_one::<String>("MAP_CLICK"),
            args.get_one::<String>("BAR_CLICK"),
        ) {
            (Some(country), _) => SelectionEvent::map_clicked(year, country),
            (None, Some(country)) => SelectionEvent::bar_clicked(year, country),
            (None, None) => SelectionEvent::year_changed(year),
        };

        Ok(Config {
            dataset,
            event,
            pretty: args.get_flag("PRETTY"),
            verbose: *args.get_one::<u8>("VERBOSE").unwrap_or(&0),
        })
    }
}

pub fn command() -> Command {
    Command::new("figures")
        .about("Print the dashboard figures for a selection as JSON")
        .arg(
            Arg::new("DATASET")
                .help("CSV or Parquet dataset")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("YEAR")
                .long("year")
                .short('y')
                .help("Selected year")
                .value_parser(value_parser!(i32)),
        )
        .arg(
            Arg::new("MAP_CLICK")
                .long("map-click")
                .help("Country clicked on the map")
                .conflicts_with("BAR_CLICK"),
        )
        .arg(
            Arg::new("BAR_CLICK")
                .long("bar-click")
                .help("Country clicked on the emissions chart"),
        )
        .arg(
            Arg::new("PRETTY")
                .long("pretty")
                .help("Pretty-print the JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("VERBOSE")
                .long("verbose")
                .short('v')
                .help("Increase verbosity")
                .action(ArgAction::Count),
        )
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let dataset = Dataset::load(&config.dataset)?;
    debug!("loaded {} records", dataset.len());

    let figures = compute_all_figures(&dataset, &config.event)?;

    let json = if config.pretty {
        serde_json::to_string_pretty(&figures)?
    } else {
        serde_json::to_string(&figures)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, String> {
        let matches = command()
            .try_get_matches_from(args)
            .map_err(|e| e.to_string())?;
        Config::try_from(matches)
    }

    #[test]
    fn defaults_to_year_change() {
        let config = parse(&["figures", "data.csv"]).expect("parse failed");
        assert_eq!(config.dataset, PathBuf::from("data.csv"));
        assert_eq!(config.event, SelectionEvent::year_changed(2019));
        assert!(!config.pretty);
    }

    #[test]
    fn click_flags() {
        let config = parse(&["figures", "data.csv", "--year", "2010", "--map-click", "Japan"])
            .expect("parse failed");
        assert_eq!(config.event, SelectionEvent::map_clicked(2010, "Japan"));

        let config = parse(&["figures", "data.csv", "--bar-click", "China", "--pretty", "-vv"])
            .expect("parse failed");
        assert_eq!(config.event, SelectionEvent::bar_clicked(2019, "China"));
        assert!(config.pretty);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn clicks_are_exclusive() {
        assert!(parse(&["figures", "data.csv", "--map-click", "A", "--bar-click", "B"]).is_err());
    }

    #[test]
    fn dataset_required() {
        assert!(parse(&["figures"]).is_err());
    }
}
