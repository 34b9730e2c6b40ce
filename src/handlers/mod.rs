pub mod content_type;
pub mod csv_forward;
