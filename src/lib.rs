pub mod export_core;
