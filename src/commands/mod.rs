pub type CmdResult<T> = batwrap::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub(crate) dry_run: bool,
}

pub mod columns;
pub mod config;
pub mod convert;
pub mod error;

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (batwrap::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Convert(args) => {
            crate::output::map_cmd_result_to_json(convert::run(args, global))
        }
        crate::Commands::Columns(args) => {
            crate::output::map_cmd_result_to_json(columns::run(args, global))
        }
        crate::Commands::Config(args) => {
            crate::output::map_cmd_result_to_json(config::run(args, global))
        }
        crate::Commands::Error(args) => {
            crate::output::map_cmd_result_to_json(error::run(args, global))
        }
        crate::Commands::List => {
            let err = batwrap::Error::other("List is handled before JSON dispatch".to_string());
            crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}
