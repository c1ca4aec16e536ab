//! Public catalog operations composed from the read ports.

pub mod service;

#[cfg(test)]
mod tests;

pub use service::CatalogService;
