pub mod data;
pub mod dispatch;
pub mod factors;
pub mod groups;
pub mod query;
pub mod schema;
pub mod sources;
pub mod summary;
