mod csv_export;

pub(crate) use csv_export::{export_to_path, write_csv};
