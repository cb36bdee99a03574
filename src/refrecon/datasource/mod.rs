//! File-based datasource layer: loading the seven input record sets and
//! persisting the report and profile artifacts as delimited text.

pub mod config;
pub mod reader;
pub mod writer;

pub use config::{FileFormat, FileSinkConfig, FileSourceConfig};
pub use reader::FileReader;
pub use writer::FileWriter;
