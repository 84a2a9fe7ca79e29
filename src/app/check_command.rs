use super::{cli_manager, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use log::info;

const CMD_NAME: &str = "check";

/// Checks the input files and the form parameters without writing any program.
pub(crate) struct CheckCommand;

impl CheckCommand {
    pub(crate) fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks the item table and the constraints for errors")
            .setting(AppSettings::DisableVersion)
            .args(&common::encoding_args())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let encoder = common::build_encoder(arg_matches)?;
        info!(
            "{} uniqueness, {} size and {} category constraint(s) over {} form(s)",
            encoder.n_items(),
            encoder.n_forms(),
            encoder.n_category_constraints(),
            encoder.n_forms()
        );
        Ok(())
    }
}
