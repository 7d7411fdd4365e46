// CKAN open-data catalog: package lookup and tabular resource loading.

pub mod client;
pub mod tables;
