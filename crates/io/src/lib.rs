// Table export

pub mod xlsx;
