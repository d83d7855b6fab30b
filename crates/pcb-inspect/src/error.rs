//! Error types for the command-line front end

use pcb_inspection::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// Loading, validating or encoding the tree failed
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Invalid arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Writing results failed
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        match self {
            CliError::Tree(err) => err.is_user_error(),
            CliError::InvalidInput(_) => true,
            CliError::Output(_) => false,
        }
    }

    pub fn is_file_error(&self) -> bool {
        matches!(self, CliError::Tree(TreeError::Io(_)))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
