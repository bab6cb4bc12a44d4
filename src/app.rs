use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli { verbose, command } = cli;

    let ctx = AppContext::bootstrap(verbose)?;

    // Transport failures carry no taxonomy of their own; classify them under
    // the command that issued the call, matching the envelope contract.
    match command {
        Command::Read(args) => commands::read::run(&ctx, args)
            .await
            .map_err(|err| err.scoped(AppError::Search)),
        Command::Send(args) => commands::send::run(&ctx, args)
            .await
            .map_err(|err| err.scoped(AppError::Send)),
        Command::Labels(args) => commands::labels::run(&ctx, args)
            .await
            .map_err(|err| err.scoped(AppError::Label)),
    }
}
