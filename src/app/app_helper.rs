use super::{cli_manager::CliManager, command::Command};
use anyhow::Result;
use log::{error, info};
use std::{ffi::OsString, sync::Once, time::SystemTime};

static LOGGER_INIT: Once = Once::new();

/// The main struct used to build the app.
///
/// Commands are registered with [`add_command`](Self::add_command) before calling [`launch_app`](Self::launch_app),
/// which initializes the logger, reads the CLI arguments and executes the right command.
/// If the command returns an error, the error chain is logged and the process exits with status 1.
pub(crate) struct AppHelper<'a> {
    cli_manager: CliManager<'a>,
}

impl<'a> AppHelper<'a> {
    pub(crate) fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        AppHelper {
            cli_manager: CliManager::new(app_name, version, author, about),
        }
    }

    pub(crate) fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.cli_manager.add_command(command);
    }

    pub(crate) fn launch_app(self) {
        self.launch_app_with_args(std::env::args_os())
    }

    pub(crate) fn launch_app_with_args<I, T>(self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Err(e) = self.execute_app(args) {
            error!("an error occurred: {}", e);
            e.chain()
                .skip(1)
                .for_each(|err| error!("caused by: {}", err));
            std::process::exit(1);
        }
    }

    fn execute_app<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let start_time = SystemTime::now();
        let result = self.cli_manager.parse_cli(args);
        if result.is_ok() {
            info!(
                "exiting successfully after {:?}",
                start_time.elapsed().unwrap_or_default()
            );
        }
        result
    }
}

pub(crate) fn init_logger() {
    init_logger_with_level(log::LevelFilter::Info)
}

/// Initializes the logger; only the first call has an effect.
///
/// Log messages go to the standard error, since the standard output may receive programs.
pub(crate) fn init_logger_with_level(level: log::LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "![{:5}] {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply()
            .unwrap_or(());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{App, Arg, ArgMatches, SubCommand};

    struct FailingCommand;

    impl<'a> Command<'a> for FailingCommand {
        fn name(&self) -> &str {
            "fail_on_demand"
        }

        fn clap_subcommand(&self) -> App<'a, 'a> {
            SubCommand::with_name("fail_on_demand")
                .about("fails if asked to")
                .arg(Arg::with_name("fail").short("x"))
        }

        fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
            if arg_matches.is_present("fail") {
                Err(anyhow::anyhow!("failure on demand"))
            } else {
                Ok(())
            }
        }
    }

    fn helper() -> AppHelper<'static> {
        init_logger();
        let mut h = AppHelper::new("ata", "0.0.0", "author", "about");
        h.add_command(Box::new(FailingCommand));
        h
    }

    #[test]
    fn test_no_subcommand() {
        helper().execute_app(vec!["ata"]).unwrap_err();
    }

    #[test]
    fn test_subcommand_ok() {
        helper()
            .execute_app(vec!["ata", "fail_on_demand"])
            .unwrap();
    }

    #[test]
    fn test_subcommand_err() {
        helper()
            .execute_app(vec!["ata", "fail_on_demand", "-x"])
            .unwrap_err();
    }
}
