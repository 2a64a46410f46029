//! Export adapters - Implementations of the CaseExportService port.

mod local_export;

pub use local_export::LocalExportService;
