use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// measure the transfer weight of every url in the list.
    MEASURE {
        /// the summary csv file to write.
        #[clap(short, long, default_value = "site_summary.csv")]
        output: String,
    },
    /// save every url in the list as a whole page mhtml snapshot.
    SNAPSHOT {
        /// the directory the snapshot files are written to.
        #[clap(short, long)]
        target_destination: Option<String>,
        /// the index csv file to write.
        #[clap(short, long, default_value = "snapshot_summary.csv")]
        output: String,
    },
}
