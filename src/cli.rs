//! Command-line definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{MaterialSelection, Tier};
use crate::infra::steamdt::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use crate::util::version::VERSION_LABEL;

#[derive(Parser)]
#[command(name = "tradeup-scanner")]
#[command(about = "CS2 trade-up float calculator and price board", long_about = None)]
#[command(version = VERSION_LABEL)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Directory holding the per-family price files
    #[arg(long, global = true, env = "TRADEUP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// SteamDT open API key
    #[arg(long, global = true, env = "STEAMDT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Price API base URL
    #[arg(long, global = true, env = "STEAMDT_BASE_URL")]
    pub base_url: Option<String>,

    /// Maximum price lookups in flight
    #[arg(long, global = true, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List trade-up families with their materials and float ranges
    #[command(visible_alias = "f")]
    Families,

    /// Show the price board for a family, optionally refreshing it first
    #[command(visible_alias = "p")]
    Prices {
        /// Family id (e.g. "revolution", "nightmare")
        family: String,

        /// Exterior to quote output prices at (fn, mw, ft, ww, bs)
        #[arg(short, long)]
        tier: Option<Tier>,

        /// Exterior to quote material prices at
        #[arg(long, default_value = "ft")]
        material_tier: Tier,

        /// Refresh every price in one list, or both lists when no value is given
        #[arg(
            long,
            value_enum,
            value_name = "LIST",
            num_args = 0..=1,
            default_missing_value = "both"
        )]
        refresh_all: Option<RefreshScope>,

        /// Refresh a single item by display name
        #[arg(long, value_name = "NAME", conflicts_with = "refresh_all")]
        refresh: Option<String>,

        /// Also chart material prices against the break-even line
        #[arg(short, long)]
        materials: bool,
    },

    /// Map a material float into the output range
    #[command(visible_alias = "m")]
    Map {
        family: String,
        material: String,
        #[arg(allow_negative_numbers = true)]
        wear: f64,
    },

    /// Highest material float that still yields the requested exterior
    MaxWear {
        family: String,
        material: String,
        tier: Tier,

        /// Use the family's restricted output range (e.g. Gamma Doppler)
        #[arg(short, long)]
        restricted: bool,
    },

    /// Preview a trade-up from material=wear selections
    #[command(visible_alias = "c")]
    Combine {
        family: String,

        /// Material and float as NAME=WEAR; repeat for each input
        #[arg(short = 'm', long = "material", value_parser = parse_selection, required = true)]
        selections: Vec<MaterialSelection>,
    },
}

/// Which price lists a full refresh covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RefreshScope {
    Outputs,
    Materials,
    Both,
}

/// Parses `NAME=WEAR`, splitting on the last `=` so names may contain one.
pub fn parse_selection(raw: &str) -> Result<MaterialSelection, String> {
    let (name, wear) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=WEAR, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing material name in '{raw}'"));
    }
    let wear: f64 = wear
        .trim()
        .parse()
        .map_err(|err| format!("invalid wear '{}': {err}", wear.trim()))?;
    Ok(MaterialSelection::new(name, wear))
}
