//! Objects used to read item tables and constraint specifications, and to write programs.

mod constraint_spec_reader;
pub use constraint_spec_reader::ConstraintSpecReader;

mod csv_reader;
pub use csv_reader::CsvItemTableReader;

mod file_writer;
pub use file_writer::write_file_atomically;

mod specs;
pub use specs::ItemTableReader;
pub use specs::WarningHandler;
