pub mod export;

pub use export::{is_export_file_name, output_file_name, records_to_pretty_json, save_records_json};
