mod form;
mod organization;
mod submission;
mod user;

pub use form::{ContactField, Form, FormDraft, FormQuestion, FormSchema, FormUpdate};
pub use organization::{Membership, OrganizationKind, select_current};
pub use submission::Submission;
pub use user::UserProfile;
