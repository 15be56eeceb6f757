pub mod auth;
pub mod company;
pub mod dashboard;
pub mod invoice;
pub mod product;
