//! Case records and the header-addressed CSV table they are read from and written back to.

pub mod domain;
mod parser;
mod table;

pub use domain::{
    BusinessType, Case, CaseId, CaseStatus, DisputeStatus, ModelCase, SlaStatus,
    UnrecognizedValue,
};
pub use table::{CaseTable, CaseTableError};
