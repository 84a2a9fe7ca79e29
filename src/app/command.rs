use anyhow::Result;
use clap::{App, ArgMatches};

/// A subcommand of the app.
///
/// A command declares its CLI arguments through clap, and runs given the values clap matched for them.
/// Command names must be unique within an app.
pub(crate) trait Command<'a> {
    /// The name used to invoke the command.
    fn name(&self) -> &str;

    /// The clap description of the command and its arguments.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Runs the command.
    ///
    /// Returning an error makes the app exit with a failure status code.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}
