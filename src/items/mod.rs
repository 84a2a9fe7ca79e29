//! The table of items to spread over forms.

mod item_table;
pub use item_table::ItemTable;
