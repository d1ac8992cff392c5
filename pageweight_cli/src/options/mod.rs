/// Program arguments.
pub mod args;
/// Subcommands of the program.
pub mod sub_command;

pub use args::Cli;
pub use sub_command::Commands;
