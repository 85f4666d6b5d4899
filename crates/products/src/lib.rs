//! Product catalog as seen by the sales entry form.
//!
//! Decodes the backend's product listing leniently and offers lookup and
//! search over the products that can still be sold. No IO.

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, ProductOption};
pub use product::{CatalogProduct, ProductRecord};
