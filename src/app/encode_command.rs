use super::{cli_manager, command::Command, common};
use anyhow::Result;
use ata::io::write_file_atomically;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;

const CMD_NAME: &str = "encode";

const ARG_OUT: &str = "ARG_OUT";

/// Writes the lp_solve program assembling the forms.
pub(crate) struct EncodeCommand;

impl EncodeCommand {
    pub(crate) fn new() -> Self {
        EncodeCommand
    }
}

impl<'a> Command<'a> for EncodeCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Encodes a test assembly problem into an lp_solve program")
            .setting(AppSettings::DisableVersion)
            .args(&common::encoding_args())
            .arg(
                Arg::with_name(ARG_OUT)
                    .short("o")
                    .long("output")
                    .empty_values(false)
                    .multiple(false)
                    .help("the output file for the program (standard output if absent)")
                    .required(false),
            )
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let encoder = common::build_encoder(arg_matches)?;
        match arg_matches.value_of(ARG_OUT) {
            Some(output_file) => {
                write_file_atomically(output_file, |w| encoder.write_lp(w))?;
                info!("program written to {:?}", output_file);
            }
            None => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                encoder.write_lp(&mut out)?;
            }
        }
        Ok(())
    }
}
