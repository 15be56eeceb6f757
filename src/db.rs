pub mod user_repo;
pub use user_repo::UserRepository;
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod invoice_repo;
pub use invoice_repo::InvoiceRepository;
