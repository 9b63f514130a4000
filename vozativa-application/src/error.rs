use thiserror::Error;

use vozativa_core::{repositories, usecases};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] usecases::Error),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<usecases::Error> for AppError {
    fn from(err: usecases::Error) -> Self {
        AppError::Business(err.into())
    }
}

impl From<repositories::Error> for AppError {
    fn from(err: repositories::Error) -> Self {
        AppError::Business(err.into())
    }
}
