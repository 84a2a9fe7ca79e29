use super::{
    app_helper::{init_logger, init_logger_with_level},
    command::Command,
    writable_string::WritableString,
};
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg};
use log::info;
use std::{ffi::OsString, str::FromStr};
use sysinfo::System;

/// Handles the set of commands and processes the CLI arguments against them.
pub(crate) struct CliManager<'a> {
    app_name: &'a str,
    version: &'a str,
    author: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

pub(crate) const APP_HELPER_LOGGING_LEVEL_ARG: &str = "APP_HELPER_LOGGING_LEVEL_ARG";

pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(APP_HELPER_LOGGING_LEVEL_ARG)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

impl<'a> CliManager<'a> {
    pub(crate) fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        CliManager {
            app_name,
            version,
            author,
            about,
            commands: vec![],
        }
    }

    pub(crate) fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    pub(crate) fn parse_cli<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<T> = args.into_iter().collect();
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::NeedsSubcommandHelp)
            .setting(AppSettings::SubcommandRequired)
            .version(self.version)
            .author(self.author)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        match app.clone().get_matches_from_safe(args.clone()) {
            Ok(matches) => {
                let (name, command_matches) = matches.subcommand();
                let command = self.commands.iter().find(|c| c.name() == name);
                match (command, command_matches) {
                    (Some(c), Some(command_matches)) => {
                        let log_level = command_matches
                            .value_of(APP_HELPER_LOGGING_LEVEL_ARG)
                            .and_then(|l| log::LevelFilter::from_str(l).ok())
                            .unwrap_or(log::LevelFilter::Info);
                        init_logger_with_level(log_level);
                        info!("{} {}", self.app_name, self.version);
                        sys_info();
                        c.execute(command_matches)
                    }
                    _ => Err(anyhow!("no command to execute")),
                }
            }
            Err(clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                ..
            }) => {
                init_logger();
                self.print_help(&mut app, args.as_slice());
                Ok(())
            }
            Err(e) => {
                init_logger();
                info!("{} {}", self.app_name, self.version);
                Err(anyhow!("{}", e))
            }
        }
    }

    fn print_help<T>(&self, app: &mut App, args: &[T])
    where
        T: Into<OsString> + Clone,
    {
        const HELP_STRINGS: [&str; 3] = ["help", "-h", "--help"];
        fn print_message(message: WritableString) {
            message.to_string().split('\n').for_each(|s| info!("{}", s));
            info!("");
        }
        let as_string = |arg: &T| Into::<OsString>::into(arg.clone()).to_string_lossy().to_string();
        let command_help = |name: &str| {
            self.commands.iter().find(|c| c.name() == name).map(|c| {
                let mut message = WritableString::default();
                c.clap_subcommand()
                    .write_long_help(&mut message)
                    .map(|()| message)
            })
        };
        let requested = match args {
            [_, arg1, ..] if !HELP_STRINGS.contains(&as_string(arg1).as_str()) => {
                command_help(&as_string(arg1))
            }
            [_, _, arg2, ..] => command_help(&as_string(arg2)),
            _ => None,
        };
        match requested {
            Some(Ok(message)) => print_message(message),
            _ => {
                let mut message = WritableString::default();
                if app.write_long_help(&mut message).is_ok() {
                    print_message(message);
                }
            }
        }
    }
}

fn sys_info() {
    info!("----------------------------------------");
    let sys = System::new_all();
    let unknown = || "[unknown]".to_string();
    info!("running on {}", System::host_name().unwrap_or_else(unknown));
    info!(
        "OS is {} {} with kernel {}",
        System::name().unwrap_or_else(unknown),
        System::os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown)
    );
    let mut cpu_kinds: Vec<&str> = sys.cpus().iter().map(|p| p.brand()).collect();
    cpu_kinds.sort_unstable();
    cpu_kinds.dedup();
    info!(
        "physical core count: {} {:?}",
        sys.physical_core_count()
            .map(|n| n.to_string())
            .unwrap_or_else(unknown),
        cpu_kinds
    );
    info!("total memory: {} KB", sys.total_memory() / 1024);
    info!("----------------------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{ArgMatches, SubCommand};
    use std::{cell::RefCell, rc::Rc};

    struct RecordingCommand {
        executed: Rc<RefCell<bool>>,
        flag_set: Rc<RefCell<bool>>,
    }

    impl<'a> Command<'a> for RecordingCommand {
        fn name(&self) -> &str {
            "record"
        }

        fn clap_subcommand(&self) -> App<'a, 'a> {
            SubCommand::with_name("record")
                .about("records its execution")
                .arg(Arg::with_name("flag").short("a"))
                .arg(logging_level_cli_arg())
        }

        fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
            *self.executed.borrow_mut() = true;
            if arg_matches.is_present("flag") {
                *self.flag_set.borrow_mut() = true;
            }
            Ok(())
        }
    }

    fn run(args: Vec<&'static str>) -> Result<(bool, bool)> {
        let mut manager = CliManager::new("ata", "0.0.0", "author", "about");
        let executed = Rc::new(RefCell::new(false));
        let flag_set = Rc::new(RefCell::new(false));
        manager.add_command(Box::new(RecordingCommand {
            executed: Rc::clone(&executed),
            flag_set: Rc::clone(&flag_set),
        }));
        manager.parse_cli(args)?;
        let result = (*executed.borrow(), *flag_set.borrow());
        Ok(result)
    }

    #[test]
    fn test_command_executed() {
        assert_eq!((true, false), run(vec!["ata", "record"]).unwrap());
    }

    #[test]
    fn test_command_and_flag() {
        assert_eq!((true, true), run(vec!["ata", "record", "-a"]).unwrap());
    }

    #[test]
    fn test_logging_level() {
        assert_eq!(
            (true, false),
            run(vec!["ata", "record", "--logging-level", "off"]).unwrap()
        );
        assert!(run(vec!["ata", "record", "--logging-level", "foo"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        assert!(run(vec!["ata"]).is_err());
    }

    #[test]
    fn test_wrong_subcommand() {
        assert!(run(vec!["ata", "foo"]).is_err());
    }

    #[test]
    fn test_wrong_arg() {
        assert!(run(vec!["ata", "record", "-b"]).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!((false, false), run(vec!["ata", "-h"]).unwrap());
        assert_eq!((false, false), run(vec!["ata", "help"]).unwrap());
        assert_eq!((false, false), run(vec!["ata", "help", "record"]).unwrap());
        assert_eq!((false, false), run(vec!["ata", "record", "-h"]).unwrap());
    }
}
