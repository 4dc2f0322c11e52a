pub mod ingest;
pub mod providers;
pub mod recommendations;
