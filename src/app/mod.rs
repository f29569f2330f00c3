pub mod catalog_service;
pub mod notices;
