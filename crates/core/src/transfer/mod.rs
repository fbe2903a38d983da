//! Transfer module - CSV export and import.

mod transfer_service;

pub use transfer_service::{TransferService, TransferServiceTrait};
