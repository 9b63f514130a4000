use thiserror::Error;

use vozativa_entities::{email::EmailAddressParseError, password};

#[derive(Debug, Error)]
pub enum Error {
    #[error("The user name is invalid")]
    UserName,
    #[error("The e-mail address is invalid")]
    Email,
    #[error("A user with the given e-mail address already exists")]
    UserExists,
    #[error("The password is invalid")]
    Password,
    #[error("The passwords do not match")]
    PasswordMismatch,
    #[error("Invalid credentials")]
    Credentials,
    #[error("The title is invalid")]
    Title,
    #[error("The description is invalid")]
    Description,
    #[error("The category is invalid")]
    Category,
    #[error("The occurrence type is invalid")]
    Occurrence,
    #[error("The contact info is invalid")]
    Contact,
    #[error("The geographic position is incomplete or out of range")]
    Position,
    #[error("The comment must not be empty")]
    EmptyComment,
    #[error("This user is not authorized")]
    Unauthorized,
    #[error("This user has insufficient permissions")]
    Forbidden,
    #[error(transparent)]
    Repo(#[from] crate::repositories::Error),
}

impl From<password::ParseError> for Error {
    fn from(_: password::ParseError) -> Self {
        Error::Password
    }
}

impl From<EmailAddressParseError> for Error {
    fn from(_: EmailAddressParseError) -> Self {
        Error::Email
    }
}
