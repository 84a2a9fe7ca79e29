use super::{ItemTableReader, WarningHandler};
use crate::items::ItemTable;
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

const DEFAULT_ID_COLUMN: &str = "item_id";

const UTF8_BOM: char = '\u{feff}';

lazy_static! {
    static ref FIELD_PATTERN: Regex =
        Regex::new(r#"^\s*(?:"((?:[^"]|"")*)"|([^,"]*?))\s*(,|$)"#).unwrap();
}

fn split_fields(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut rest = line;
    loop {
        let captures = FIELD_PATTERN
            .captures(rest)
            .ok_or_else(|| anyhow!(r#"malformed field at "{}""#, rest.trim()))?;
        let field = match captures.get(1) {
            Some(quoted) => quoted.as_str().replace(r#""""#, r#"""#),
            None => captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        };
        fields.push(field);
        match captures.get(3).map(|m| m.as_str()) {
            Some(",") => rest = &rest[captures.get(0).unwrap().end()..],
            _ => return Ok(fields),
        }
    }
}

/// A reader for item tables written as CSV.
///
/// The first non-empty line is the header, giving the column names.
/// One of the columns contains the item identifiers (`item_id` by default); the other ones are attributes.
/// Fields are separated by commas and may be surrounded by double quotes,
/// in which case a double quote inside the field is written twice.
/// Spaces around fields are ignored, as well as empty lines.
///
/// # Example
///
/// The following content defines three items `a`, `b` and `c`, with two attributes `Content` and `Difficulty`.
///
/// ```text
/// item_id,Content,Difficulty
/// a,1,easy
/// b,2,"very hard"
/// c,1,easy
/// ```
///
/// ```
/// # use ata::io::{CsvItemTableReader, ItemTableReader};
/// let reader = CsvItemTableReader::default();
/// let table = reader.read(&mut "item_id,Content\na,1\nb,2\n".as_bytes()).unwrap();
/// assert_eq!(2, table.n_items());
/// ```
pub struct CsvItemTableReader {
    id_column: String,
    warning_handlers: Vec<WarningHandler>,
}

impl CsvItemTableReader {
    /// Builds a new reader, given the name of the column containing the item identifiers.
    pub fn new(id_column: &str) -> Self {
        CsvItemTableReader {
            id_column: id_column.to_string(),
            warning_handlers: vec![],
        }
    }

    fn read_header(&self, mut fields: Vec<String>) -> Result<(Vec<String>, usize)> {
        if let Some(first) = fields.first_mut() {
            *first = first.trim_start_matches(UTF8_BOM).trim().to_string();
        }
        if let Some(i) = fields.iter().position(|f| f.is_empty()) {
            return Err(anyhow!("the column with index {} has no name", i));
        }
        match fields.iter().position(|f| *f == self.id_column) {
            Some(id_index) => Ok((fields, id_index)),
            None => Err(anyhow!(
                r#"missing column "{}" for item identifiers"#,
                self.id_column
            )),
        }
    }
}

impl Default for CsvItemTableReader {
    fn default() -> Self {
        Self::new(DEFAULT_ID_COLUMN)
    }
}

impl ItemTableReader for CsvItemTableReader {
    fn read(&self, reader: &mut dyn Read) -> Result<ItemTable> {
        let br = BufReader::new(reader);
        let mut header = None;
        let mut rows = Vec::new();
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            if l.trim().is_empty() {
                continue;
            }
            let fields = split_fields(&l).with_context(context)?;
            if header.is_none() {
                header = Some(self.read_header(fields).with_context(context)?);
                continue;
            }
            let (column_names, id_index) = header.as_ref().unwrap();
            if fields.len() != column_names.len() {
                return Err(anyhow!(
                    "expected {} field(s), got {}",
                    column_names.len(),
                    fields.len()
                ))
                .with_context(context);
            }
            if fields[*id_index].is_empty() {
                return Err(anyhow!("empty item identifier")).with_context(context);
            }
            for (name, value) in column_names.iter().zip(fields.iter()) {
                if value.is_empty() {
                    self.warning_handlers.iter().for_each(|h| {
                        (h)(
                            1 + i,
                            format!(
                                r#"item "{}" has no value for attribute "{}""#,
                                fields[*id_index], name
                            ),
                        )
                    });
                }
            }
            rows.push(fields);
        }
        let (column_names, id_index) = header.ok_or_else(|| anyhow!("missing header"))?;
        let ids = rows
            .iter()
            .map(|r| r[id_index].as_str())
            .collect::<Vec<&str>>();
        let mut table = ItemTable::new_with_ids(&ids)?;
        for (j, name) in column_names.iter().enumerate() {
            if j == id_index {
                continue;
            }
            let column = rows.iter().map(|r| r[j].as_str()).collect::<Vec<&str>>();
            table.add_attribute(name, &column)?;
        }
        Ok(table)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}
