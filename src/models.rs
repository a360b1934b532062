pub mod catalog;
pub mod dashboard;
pub mod order;
pub mod product;
pub mod store;
