use crate::items::ItemTable;
use anyhow::Result;
use std::io::Read;

/// The type of callback functions to call when warnings are raised while parsing an item table.
///
/// The arguments are the line number (starting at 1) and the warning message.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read item tables.
pub trait ItemTableReader {
    /// Reads an [`ItemTable`].
    ///
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use ata::io::{CsvItemTableReader, ItemTableReader};
    /// # use ata::items::ItemTable;
    /// fn read_table_from_str(s: &str) -> ItemTable {
    ///     let reader = CsvItemTableReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("invalid CSV table")
    /// }
    /// # read_table_from_str("item_id,Content\na,1\n");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<ItemTable>;

    /// Adds a callback function to call when warnings are raised while parsing an item table.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
