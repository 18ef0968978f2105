use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, routes::routes},
};

/// Dispatch to the command handler. `serve` is handled by `main` before this.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Routes(cmd)) => routes(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => bail!("Serve command should be handled before run()"),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
