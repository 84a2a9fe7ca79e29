use super::{
    app_helper::AppHelper, command::Command, AuthorsCommand, CheckCommand,
    DefaultConstraintsCommand, EncodeCommand,
};
use anyhow::{anyhow, Context, Result};
use ata::{
    constraints::{Constraint, ConstraintSpec, MULTI_ATTRIBUTE_SEPARATOR},
    encoding::{EncodingListener, ProblemEncoder},
    io::{ConstraintSpecReader, CsvItemTableReader, ItemTableReader},
    items::ItemTable,
};
use clap::{Arg, ArgMatches};
use log::{debug, info, warn};
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::PathBuf,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "ATA, an automated test assembly encoder for lp_solve.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(DefaultConstraintsCommand::new()),
        Box::new(EncodeCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .long("input")
        .empty_values(false)
        .multiple(false)
        .help("the CSV file that contains the items")
        .required(true)
}

pub(crate) const ARG_ID_COLUMN: &str = "ID_COLUMN";

pub(crate) fn id_column_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_ID_COLUMN)
        .long("id-column")
        .empty_values(false)
        .multiple(false)
        .default_value("item_id")
        .help("the column of the CSV file that contains the item identifiers")
        .required(false)
}

pub(crate) const ARG_CONSTRAINTS: &str = "CONSTRAINTS";

pub(crate) fn constraints_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_CONSTRAINTS)
        .short("c")
        .long("constraints")
        .empty_values(false)
        .multiple(false)
        .help("the JSON file that contains the content constraints (default constraints if absent)")
        .required(false)
}

pub(crate) const ARG_FORMS: &str = "FORMS";
pub(crate) const ARG_ITEMS_PER_FORM: &str = "ITEMS_PER_FORM";

pub(crate) fn form_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_FORMS)
            .short("n")
            .long("forms")
            .empty_values(false)
            .multiple(false)
            .default_value("2")
            .help("the number of forms to assemble")
            .required(false),
        Arg::with_name(ARG_ITEMS_PER_FORM)
            .short("k")
            .long("items-per-form")
            .empty_values(false)
            .multiple(false)
            .default_value("18")
            .help("the number of items in each form")
            .required(false),
    ]
}

/// The arguments shared by the commands that build an encoding.
pub(crate) fn encoding_args() -> Vec<Arg<'static, 'static>> {
    let mut args = vec![input_arg(), id_column_arg(), constraints_arg()];
    args.append(&mut form_args());
    args
}

fn read_count(arg_matches: &ArgMatches<'_>, arg_name: &str, what: &str) -> Result<usize> {
    let str_value = arg_matches.value_of(arg_name).unwrap();
    str_value
        .parse::<usize>()
        .map_err(|_| anyhow!(r#"expected a non-negative integer, got "{}""#, str_value))
        .with_context(|| format!("while reading the number of {}", what))
}

/// Reads the input files and the form parameters, and builds the encoder.
///
/// All the configuration errors are detected here, before any output is written.
pub(crate) fn build_encoder(arg_matches: &ArgMatches<'_>) -> Result<ProblemEncoder> {
    let n_forms = read_count(arg_matches, ARG_FORMS, "forms")?;
    let items_per_form = read_count(arg_matches, ARG_ITEMS_PER_FORM, "items per form")?;
    let table = read_item_table(
        arg_matches.value_of(ARG_INPUT).unwrap(),
        arg_matches.value_of(ARG_ID_COLUMN).unwrap(),
    )?;
    let spec = match arg_matches.value_of(ARG_CONSTRAINTS) {
        Some(path) => read_file_path_with(path, &|r| ConstraintSpecReader::default().read(r))?,
        None => {
            info!("no constraint file provided; using the default constraints");
            ConstraintSpec::default_content_spec()
        }
    };
    info!(
        "the constraint specification has {} rule(s) and {} category bound(s)",
        spec.n_rules(),
        spec.n_category_bounds()
    );
    let encoder =
        ProblemEncoder::new_with_listener(&table, &spec, n_forms, items_per_form, &EncodingLogger)?;
    if encoder.lacks_items() {
        warn!(
            "{} form(s) of {} item(s) require more items than the {} available; the program is infeasible",
            n_forms,
            items_per_form,
            encoder.n_items()
        );
    }
    Ok(encoder)
}

pub(crate) fn read_item_table(file_path: &str, id_column: &str) -> Result<ItemTable> {
    let mut reader = CsvItemTableReader::new(id_column);
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let table = read_file_path_with(file_path, &|r| reader.read(r))?;
    info!(
        "the item table has {} item(s) and {} attribute(s)",
        table.n_items(),
        table.n_attributes(),
    );
    Ok(table)
}

pub(crate) fn read_file_path_with<F, R>(file_path: &str, reader: &F) -> Result<R>
where
    F: Fn(&mut dyn Read) -> Result<R>,
{
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!(r#"while opening file "{}""#, file_path))?,
    );
    (reader)(&mut file_reader).with_context(|| format!(r#"while reading file "{}""#, file_path))
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

struct EncodingLogger;

impl EncodingListener for EncodingLogger {
    fn category_constraint_built(
        &self,
        attributes: &[String],
        category: &[String],
        constraint: &Constraint,
    ) {
        let separator = MULTI_ATTRIBUTE_SEPARATOR.to_string();
        let attributes = attributes.join(&separator);
        let category = category.join(&separator);
        if constraint.is_empty() {
            warn!(
                r#"no item has the value "{}" for "{}"; the constraint "{} {}" has no variable"#,
                category,
                attributes,
                constraint.comparator(),
                constraint.bound()
            );
        } else {
            debug!(
                r#"{} item(s) with value "{}" for "{}" bounded by {} {}"#,
                constraint.item_ids().len(),
                category,
                attributes,
                constraint.comparator(),
                constraint.bound()
            );
        }
    }

    fn encoding_built(&self, n_variables: usize, n_constraints: usize) {
        info!(
            "the program has {} variable(s) and {} constraint(s)",
            n_variables, n_constraints
        );
    }
}
