pub mod catalog;
pub mod product;
