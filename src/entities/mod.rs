//! Domain records: users, publications, comments and API tokens

pub mod publication;
pub mod token;
pub mod user;

pub use publication::{NewComment, NewPublication, Publication, PublicationComment, PublicationDetail};
pub use token::AuthToken;
pub use user::{RegisterUser, TokenCredentials, User, UserDetail};
