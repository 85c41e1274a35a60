//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod snapshot_adapter;
pub mod csv_report_adapter;
