use clap::{Args, Subcommand};
use std::path::PathBuf;

use batwrap::columns::{self, ColumnCopyReport, ColumnCopyRequest};
use batwrap::{defaults, validation};

use super::CmdResult;

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(subcommand)]
    command: ColumnsCommand,
}

#[derive(Subcommand)]
enum ColumnsCommand {
    /// Copy a column from one delimited file into another, aligned by row position
    Copy {
        /// File to read the column from
        #[arg(long, value_name = "PATH")]
        source: PathBuf,

        /// File to add the column to (rewritten in place)
        #[arg(long = "dest", value_name = "PATH")]
        destination: PathBuf,

        /// Header name of the column to copy
        #[arg(long)]
        column: String,

        /// Field delimiter: one ASCII character or 'tab' [default: from config, ',']
        #[arg(long)]
        delimiter: Option<String>,
    },
}

pub fn run(args: ColumnsArgs, global: &crate::commands::GlobalArgs) -> CmdResult<ColumnCopyReport> {
    match args.command {
        ColumnsCommand::Copy {
            source,
            destination,
            column,
            delimiter,
        } => {
            let column = validation::require_non_empty(&column, "column", "Column name is required")?;
            let delimiter =
                delimiter.unwrap_or_else(|| defaults::load_defaults().columns.delimiter);

            let request = ColumnCopyRequest {
                source,
                destination,
                column: column.to_string(),
                delimiter: columns::parse_delimiter(&delimiter)?,
            };

            let prepared = columns::prepare_copy(&request)?;
            if global.dry_run {
                return Ok((prepared.report().clone(), 0));
            }

            Ok((prepared.write()?, 0))
        }
    }
}
