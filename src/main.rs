use clap::Parser;
use gridfocus::LogLevel;
use gridfocus::core::config;
use gridfocus::driver;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gridfocus", about = "Spatial focus navigation over a grid of cells")]
struct Args {
    /// Layout file (TOML). Falls back to GRIDFOCUS_LAYOUT, then general.default_layout
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Replay a move script such as "right, right, down, enter" and print JSON reports
    #[arg(short, long)]
    moves: Option<String>,

    /// Log verbosity
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();
    let cli_level: Option<LevelFilter> = args.log_level.map(Into::into);

    // The logger's own settings live in the config file, so read them quietly
    // first; the full load below runs with logging in place.
    let early = config::resolve(&config::peek_config(), args.layout.as_deref(), cli_level);

    // File logger: stdout carries the replay output
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    match File::create(&early.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(early.log_level, log_config, log_file);
        }
        Err(e) => eprintln!("gridfocus: cannot open log file {}: {e}", early.log_file.display()),
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("gridfocus: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&file_config, args.layout.as_deref(), cli_level);

    log::info!("gridfocus starting up with layout {:?}", resolved.layout_path);

    match driver::run(&resolved, args.moves.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("gridfocus: {e}");
            ExitCode::FAILURE
        }
    }
}
