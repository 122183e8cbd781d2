pub mod alerts;
pub mod auth;
pub mod disasters;
pub mod donations;
pub mod map;
pub mod reporting;
pub mod resources;
