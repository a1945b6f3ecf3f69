use clap::{CommandFactory, Parser};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use sermon::SermonError;
use sermon::core::config::{self, CliOverrides};
use sermon::serial;

#[derive(Parser)]
#[command(name = "sermon", version = sermon::VERSION, about = "Serial monitor for the terminal")]
struct Args {
    /// Baud rate
    #[arg(long)]
    baud: Option<u32>,

    /// Number of data bits (5-8)
    #[arg(long = "databits")]
    data_bits: Option<u8>,

    /// Number of stop bits (1 or 2)
    #[arg(long = "stopbits")]
    stop_bits: Option<u8>,

    /// Lines of history to keep
    #[arg(long)]
    scrollback: Option<usize>,

    /// List available serial devices and exit
    #[arg(short, long)]
    list: bool,

    /// Serial device path; prompts for one when omitted. `help` prints usage.
    device: Option<String>,
}

/// Logs go to a file: the terminal is taken over by the UI. Problems are
/// reported on stderr here, since nothing is visible once the UI starts.
fn init_logging(path: &Path, level: &str) {
    let level = parse_log_level(level);
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        eprintln!("Warning: cannot create log directory {}: {e}", parent.display());
    }
    match File::create(path) {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(level, log_config, log_file) {
                eprintln!("Warning: logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {e}", path.display()),
    }
}

fn parse_log_level(raw: &str) -> LevelFilter {
    LevelFilter::from_str(raw.trim()).unwrap_or_else(|_| {
        eprintln!("Warning: unknown log level '{raw}', using info");
        LevelFilter::Info
    })
}

fn print_devices() -> Result<(), SermonError> {
    let devices = serial::list_devices()?;
    if devices.is_empty() {
        println!("No serial devices found.");
    }
    for device in devices {
        println!("{device}");
    }
    Ok(())
}

fn prompt_device() -> Result<String, SermonError> {
    let devices = serial::list_devices()?;
    let stdin = std::io::stdin();
    serial::select_device(&devices, stdin.lock(), std::io::stdout())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.device.as_deref() == Some("help") {
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    }

    if args.list {
        return match print_devices() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error listing devices: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let device = match args.device {
        Some(device) => device,
        None => match prompt_device() {
            Ok(device) => device,
            Err(e) => {
                eprintln!("Error selecting device: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let cli = CliOverrides {
        baud: args.baud,
        data_bits: args.data_bits,
        stop_bits: args.stop_bits,
        scrollback_lines: args.scrollback,
    };
    let resolved = match config::resolve(&file_config, device, &cli) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&resolved.log_file, &resolved.log_level);
    log::info!(
        "Sermon {} starting on {} at {} baud",
        sermon::VERSION,
        resolved.serial.device,
        resolved.serial.baud
    );

    match sermon::tui::run(resolved).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Exiting with error: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
