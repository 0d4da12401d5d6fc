pub mod geocode;
pub mod import;
pub mod optimize;
pub mod template;
pub mod warehouse;
