pub mod auth;
pub mod company_service;
pub mod dashboard_service;
pub mod document_service;
pub mod invoice_service;
pub mod metrics;
pub mod product_service;
pub mod totals;
