use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use clap::Parser;

use bdselect::disambiguation::{dialog_heading, feature_label};
use bdselect::scan::scan_disc;
use bdselect::selector::rank_candidates;
use bdselect::{
    config, BdmvScanner, FeaturePrompt, FeatureSelection, NoRefreshRateChange, PlaybackPlan,
};

mod cli;

/// Numbered list on stdout, answer read from stdin. Anything that isn't a
/// number, including end of input, backs out.
struct TerminalPrompt;

impl FeaturePrompt for TerminalPrompt {
    fn choose(&mut self, heading: &str, entries: &[String]) -> i32 {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", heading);
        for (i, entry) in entries.iter().enumerate() {
            let _ = writeln!(stdout, "  {:>2}) {}", i + 1, entry);
        }
        let _ = write!(stdout, "Feature [0 to cancel]: ");
        let _ = stdout.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => 0,
            Ok(_) => line.trim().parse().unwrap_or(0),
        }
    }
}

async fn list_all(path: &Path, settings: &config::Settings) -> i32 {
    let scanner = Arc::new(BdmvScanner::new(settings.scan.clone()));
    let disc = match scan_disc(scanner, path.to_path_buf()).await {
        Ok(disc) => disc,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };

    println!("{}", dialog_heading(&disc.title));
    for (i, playlist) in rank_candidates(disc.playlists.values()).iter().enumerate() {
        println!(
            "  {:>2}) {}  {}",
            i + 1,
            feature_label(i + 1, playlist),
            disc.playlist_path(playlist).display()
        );
    }
    0
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = cli::Args::parse();

    let settings_file = config::find_settings_file(args.config.as_deref());
    let settings = config::load_settings_or_default(settings_file.as_deref());

    if !args.path.exists() {
        eprintln!("error: path does not exist: {}", args.path.display());
        std::process::exit(1);
    }

    if args.all {
        std::process::exit(list_all(&args.path, &settings).await);
    }

    let selection = FeatureSelection::with_settings(settings);
    match selection
        .prepare(&args.path, &mut TerminalPrompt, &NoRefreshRateChange)
        .await
    {
        PlaybackPlan::Play { path, chapters } => {
            println!("{}", path.display());
            println!("chapters: {}", chapters.len());
        }
        PlaybackPlan::Cancelled => println!("cancelled"),
    }
}
