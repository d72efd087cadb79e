pub mod auth;
pub mod forms;
pub mod org;
pub mod schema;
pub mod submissions;

pub use auth::AuthCommands;
pub use forms::FormsCommands;
pub use org::OrgCommands;
pub use schema::SchemaCommands;
pub use submissions::SubmissionsCommands;
