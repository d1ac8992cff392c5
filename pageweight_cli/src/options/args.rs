use crate::options::sub_command::Commands;
use clap::Parser;

/// program to measure the network weight of web pages and save snapshots.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Build main sub commands
    #[clap(subcommand)]
    pub command: Commands,
    /// Path of the url list file, one url per line.
    #[clap(short, long, default_value = "urls.txt")]
    pub input: String,
    /// How many pages to process at the same time.
    #[clap(short, long, default_value_t = 10)]
    pub workers: usize,
    /// Run chrome with a visible window.
    #[clap(long)]
    pub headed: bool,
    /// Seconds to pause after each scroll while lazy content loads.
    #[clap(long, default_value_t = 2)]
    pub scroll_pause: u64,
    /// The max scroll attempts per page.
    #[clap(long, default_value_t = 60)]
    pub max_scrolls: u32,
    /// Seconds to let triggered videos stream before the tally.
    #[clap(long, default_value_t = 5)]
    pub video_wait: u64,
    /// Path of the chrome binary to launch instead of the detected one.
    #[clap(long)]
    pub chrome_path: Option<String>,
    /// Print progress detail on standard output
    #[clap(short, long)]
    pub verbose: bool,
}
