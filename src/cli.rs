use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;
use std::path::PathBuf;

const ABOUT: &str = "ShoreSquad beach weather";

const LONG_ABOUT: &str = "
Beach weather for ShoreSquad cleanups, sourced from data.gov.sg.

The 4-day forecast is tried first. If it is unavailable the current air temperature from a
nearby station is shown instead, and if both sources fail an error card is rendered.

Settings are read from shoresquad.toml in the working directory unless --config is given.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(short, long, help = "Path to the configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the weather grid as an HTML fragment instead of text")]
    pub html: bool,

    #[arg(
        long,
        value_name = "SECS",
        help = "Keep the grid alive this many seconds, applying opacity pulses"
    )]
    pub hold: Option<u64>,

    #[arg(long, value_name = "URL", help = "Override the forecast endpoint")]
    pub forecast_url: Option<String>,

    #[arg(long, value_name = "URL", help = "Override the air temperature endpoint")]
    pub reading_url: Option<String>,
}
