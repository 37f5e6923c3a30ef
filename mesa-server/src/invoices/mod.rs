//! Invoice settlement

pub mod service;

pub use service::InvoiceService;
