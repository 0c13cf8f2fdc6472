pub mod image_store;
pub mod judge;
pub mod pin_source;
