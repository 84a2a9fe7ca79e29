mod app_helper;

mod authors_command;
pub(crate) use authors_command::AuthorsCommand;

mod check_command;
pub(crate) use check_command::CheckCommand;

pub(crate) mod cli_manager;

pub(crate) mod command;

pub(crate) mod common;

mod default_constraints_command;
pub(crate) use default_constraints_command::DefaultConstraintsCommand;

mod encode_command;
pub(crate) use encode_command::EncodeCommand;

mod writable_string;
