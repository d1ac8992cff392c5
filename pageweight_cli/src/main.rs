extern crate env_logger;
extern crate pageweight;

pub mod options;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use options::{Cli, Commands};
use pageweight::configuration::Configuration;
use pageweight::measure::measure_url;
use pageweight::report::{format_elapsed, write_measure_report, write_snapshot_report};
use pageweight::runner::{ConsoleProgress, TaskPool};
use pageweight::snapshot::snapshot_url;
use pageweight::tokio;
use pageweight::urls::{normalize_url, read_url_list};
use pageweight::utils::log;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        use env_logger::Env;
        let env = Env::default()
            .filter_or("RUST_LOG", "info")
            .write_style_or("RUST_LOG_STYLE", "always");

        env_logger::init_from_env(env);
    }

    let mut config = Configuration::new();

    config
        .with_concurrency(cli.workers)
        .with_scroll_pause(Duration::from_secs(cli.scroll_pause))
        .with_max_scrolls(cli.max_scrolls)
        .with_video_wait(Duration::from_secs(cli.video_wait))
        .with_headless(!cli.headed)
        .with_chrome_binary(cli.chrome_path.as_ref().map(PathBuf::from));

    let started = Instant::now();

    let urls = match read_url_list(&cli.input).await {
        Ok(urls) => urls,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if urls.is_empty() {
        println!("no urls found in {}.", cli.input);
        return;
    }

    let jobs: Vec<String> = urls.iter().map(|url| normalize_url(url)).collect();

    let pool = TaskPool::new(config.concurrency);
    let config = Arc::new(config);

    match cli.command {
        Commands::MEASURE { output } => {
            let outcomes = pool
                .run(
                    jobs,
                    {
                        let config = config.clone();
                        move |url: String| {
                            let config = config.clone();
                            async move { measure_url(&config, &url).await }
                        }
                    },
                    &ConsoleProgress,
                )
                .await;

            log("writing", &output);

            if let Err(err) = write_measure_report(&output, &outcomes) {
                eprintln!("{err}");
                std::process::exit(1);
            }

            println!("done. output: {output}");
        }
        Commands::SNAPSHOT {
            target_destination,
            output,
        } => {
            let snapshot_dir = target_destination
                .to_owned()
                .unwrap_or(String::from("./snapshots/"));

            let snapshot_path = Path::new(&snapshot_dir);

            if !snapshot_path.exists() {
                if let Err(err) = tokio::fs::create_dir_all(snapshot_path).await {
                    eprintln!("unable to create {snapshot_dir}: {err}");
                    std::process::exit(1);
                }
            }

            let dir = Arc::new(PathBuf::from(snapshot_path));

            let outcomes = pool
                .run(
                    jobs,
                    {
                        let config = config.clone();
                        let dir = dir.clone();
                        move |url: String| {
                            let config = config.clone();
                            let dir = dir.clone();
                            async move { snapshot_url(&config, &dir, &url).await }
                        }
                    },
                    &ConsoleProgress,
                )
                .await;

            log("writing", &output);

            if let Err(err) = write_snapshot_report(&output, &outcomes) {
                eprintln!("{err}");
                std::process::exit(1);
            }

            println!("done. output: {output}");
        }
    }

    println!("total time: {}", format_elapsed(started.elapsed()));
}
