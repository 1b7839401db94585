//! Concrete adapter implementations for ports.

pub mod csv_feed_adapter;
pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod mock_feed_adapter;
