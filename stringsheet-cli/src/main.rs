use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use stringsheet_cli::{
    cli::{Cli, Command, LogFormatArg},
    logging::{LogConfig, LogFormat, init_logging},
    run_convert_command, run_generate_command,
};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));

    let result = match &cli.command {
        Command::Generate(args) => run_generate_command(args).map(|_| true),
        Command::Convert(args) => run_convert_command(args).map(|c| c.is_complete()),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: io::stderr().is_terminal(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
    }
}
