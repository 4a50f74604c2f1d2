use clap::{CommandFactory, Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;

use commands::{columns, config, convert, error};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "batwrap")]
#[command(version = VERSION)]
#[command(about = "Wrap scripts into self-extracting batch launchers and copy columns between delimited files")]
struct Cli {
    /// Dry-run: show what would happen without writing.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a script into a self-extracting batch launcher
    Convert(convert::ConvertArgs),
    /// Delimited-file column operations
    Columns(columns::ColumnsArgs),
    /// Manage batwrap.json defaults
    Config(config::ConfigArgs),
    /// Error code registry and explanations
    Error(error::ErrorArgs),
    /// List available commands (alias for --help)
    List,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        dry_run: cli.dry_run,
    };

    if matches!(cli.command, Commands::List) {
        let mut cmd = Cli::command();
        if cmd.print_help().is_err() {
            return std::process::ExitCode::from(1);
        }
        println!();
        return std::process::ExitCode::SUCCESS;
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
