use super::{cli_manager, command::Command};
use anyhow::Result;
use ata::{constraints::ConstraintSpec, io::ConstraintSpecReader};
use clap::{App, AppSettings, ArgMatches, SubCommand};

const CMD_NAME: &str = "default-constraints";

/// Prints the constraints used when no constraint file is given, as a starting point for custom ones.
pub(crate) struct DefaultConstraintsCommand;

impl DefaultConstraintsCommand {
    pub(crate) fn new() -> Self {
        DefaultConstraintsCommand
    }
}

impl<'a> Command<'a> for DefaultConstraintsCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Displays the default content constraints as JSON")
            .setting(AppSettings::DisableVersion)
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, _arg_matches: &ArgMatches<'_>) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        ConstraintSpecReader::default().write(&ConstraintSpec::default_content_spec(), &mut out)
    }
}
