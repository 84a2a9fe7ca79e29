use crate::constraints::ConstraintSpec;
use anyhow::{Context, Result};
use std::io::{BufReader, Read, Write};

/// A reader (and writer) for constraint specifications written in JSON.
///
/// The format is the one of the serialization of [`ConstraintSpec`]:
///
/// ```text
/// {
///   "Content": [
///     { "comparator": ">=", "values": { "1": 0, "2": 0 } },
///     { "comparator": "<=", "values": { "1": 10, "2": 10 } }
///   ],
///   "Content&Difficulty": [
///     { "comparator": "<=", "values": { "1&hard": 2 } }
///   ]
/// }
/// ```
///
/// # Example
///
/// ```
/// # use ata::io::ConstraintSpecReader;
/// let reader = ConstraintSpecReader::default();
/// let json = r#"{"Content": [{"comparator": "<=", "values": {"1": 1}}]}"#;
/// let spec = reader.read(&mut json.as_bytes()).unwrap();
/// assert_eq!(1, spec.n_rules());
/// ```
#[derive(Default)]
pub struct ConstraintSpecReader;

impl ConstraintSpecReader {
    /// Reads a constraint specification.
    ///
    /// An error is returned if the content is not valid JSON, if a comparator is unknown, or if a bound is not an integer.
    pub fn read(&self, reader: &mut dyn Read) -> Result<ConstraintSpec> {
        serde_json::from_reader(BufReader::new(reader))
            .context("while reading the constraint specification")
    }

    /// Writes a constraint specification, using an indented layout.
    pub fn write(&self, spec: &ConstraintSpec, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing the constraint specification";
        serde_json::to_writer_pretty(&mut *writer, spec).context(context)?;
        writeln!(writer).context(context)?;
        writer.flush().context(context)
    }
}
