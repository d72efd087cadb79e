pub mod auth;
pub mod dispatch;
pub mod forms;
pub mod org;
pub mod schema;
pub mod submissions;
