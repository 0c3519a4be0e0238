use clap::{CommandFactory, FromArgMatches};

use regan::cli::{Cli, ABOUT, USAGE_EXAMPLE};
use regan::config_file::ConfigFile;
use regan::platform::{ExitCode, SafeStderr};
use regan::report::{write_report, Report};
use regan::RegistryConfig;

fn main() {
    let mut stderr = SafeStderr::new();

    let cli = process_args_with_config(&mut stderr);
    let config = RegistryConfig::from_cli(&cli);

    if config.input.files.is_empty() {
        stderr.writeln(ABOUT).unwrap_or(());
        stderr.writeln("").unwrap_or(());
        stderr.writeln(USAGE_EXAMPLE).unwrap_or(());
        stderr.writeln("").unwrap_or(());
        stderr
            .writeln(&config.format_error_message("No filename specified, exiting."))
            .unwrap_or(());
        ExitCode::GeneralError.exit();
    }

    let files = &config.input.files;
    if config.output.show_progress() {
        stderr
            .writeln(&config.format_info_message(&format!(
                "Given {} files: {}",
                files.len(),
                files.join(", ")
            )))
            .unwrap_or(());
        stderr
            .writeln(&config.format_info_message(&format!(
                "Starting analysis with {} workers...",
                config.effective_workers()
            )))
            .unwrap_or(());
    }

    let result = match regan::analyse(&config) {
        Ok(result) => result,
        Err(e) => {
            stderr
                .writeln(&config.format_error_message(&format!("{:#}", e)))
                .unwrap_or(());
            ExitCode::GeneralError.exit();
        }
    };

    let report = Report::from_result(&result, files.len());
    if let Err(e) = write_report(&mut stderr, &report, &result, &config.output) {
        stderr
            .writeln(&config.format_error_message(&format!("Failed to write report: {}", e)))
            .unwrap_or(());
        ExitCode::GeneralError.exit();
    }

    if result.has_failures() {
        ExitCode::GeneralError.exit();
    }
    ExitCode::Success.exit();
}

/// Extract --config-file argument from raw args
fn extract_config_file_arg(args: &[String]) -> Option<String> {
    args.windows(2)
        .find(|pair| pair[0] == "--config-file")
        .map(|pair| pair[1].clone())
}

/// Apply config file defaults and aliases, then parse the command line
fn process_args_with_config(stderr: &mut SafeStderr) -> Cli {
    let raw_args: Vec<String> = std::env::args().collect();

    let config_file_path = extract_config_file_arg(&raw_args);

    // Check for --show-config first, before any other processing
    if raw_args.iter().any(|arg| arg == "--show-config") {
        ConfigFile::show_config();
        ExitCode::Success.exit();
    }

    let processed_args = if raw_args.iter().any(|arg| arg == "--ignore-config") {
        raw_args
    } else {
        match ConfigFile::load_with_custom_path(config_file_path.as_deref()) {
            Ok(config_file) => match config_file.process_args(raw_args) {
                Ok(processed) => processed,
                Err(e) => {
                    stderr
                        .writeln(&format!("regan: Config error: {}", e))
                        .unwrap_or(());
                    ExitCode::InvalidUsage.exit();
                }
            },
            Err(e) => {
                stderr
                    .writeln(&format!("regan: Config file error: {:#}", e))
                    .unwrap_or(());
                ExitCode::InvalidUsage.exit();
            }
        }
    };

    // clap exits with status 2 on invalid options and 0 on --help/--version
    let matches = Cli::command().get_matches_from(processed_args);
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| {
        stderr
            .writeln(&format!("regan: Error: {}", e))
            .unwrap_or(());
        ExitCode::InvalidUsage.exit();
    })
}
