use clap::{Args, Subcommand};
use serde::Serialize;

use batwrap::error::{codes, help};

use super::CmdResult;

#[derive(Args)]
pub struct ErrorArgs {
    #[command(subcommand)]
    command: ErrorCommand,
}

#[derive(Subcommand)]
enum ErrorCommand {
    /// List available batwrap error codes
    Codes,
    /// Explain an error code
    Explain {
        /// Error code (example: `columns.row_count_mismatch`)
        code: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCodesOutput {
    pub command: String,
    pub codes: Vec<help::ErrorHelpSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorExplainOutput {
    pub command: String,
    pub help: help::ErrorHelp,
}

pub fn run(args: ErrorArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<serde_json::Value> {
    match args.command {
        ErrorCommand::Codes => {
            let output = ErrorCodesOutput {
                command: "error.codes".to_string(),
                codes: help::list(),
            };
            let value = serde_json::to_value(output)
                .map_err(|e| batwrap::Error::internal_json(e.to_string(), None))?;
            Ok((value, 0))
        }
        ErrorCommand::Explain { code } => {
            let Some(code_enum) = codes::parse_code(&code) else {
                return Err(batwrap::Error::validation_unknown_error_code(code));
            };

            let output = ErrorExplainOutput {
                command: "error.explain".to_string(),
                help: help::explain(code_enum),
            };
            let value = serde_json::to_value(output)
                .map_err(|e| batwrap::Error::internal_json(e.to_string(), None))?;
            Ok((value, 0))
        }
    }
}
