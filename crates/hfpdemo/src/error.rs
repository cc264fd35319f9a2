//! Error types for the hfpdemo library
//!
//! This module defines the error types used throughout the library. Every
//! shell-level error carries the numeric code the console historically
//! reported, available through `code()`.

use thiserror::Error;

/// Dispatcher code for a command that requested the shell to exit.
pub const EXIT_CODE: i32 = -3;

/// Failure status returned by a call into the Bluetooth stack
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("stack call failed with status {status}")]
pub struct StackError {
    pub status: i32,
}

impl StackError {
    pub fn new(status: i32) -> Self {
        Self { status }
    }
}

/// Result type for calls into the Bluetooth stack
pub type StackResult<T> = Result<T, StackError>;

/// Errors produced while parsing, dispatching or running a shell command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("No command specified")]
    NoCommand,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Function error")]
    FunctionError,

    #[error("{function}() Failure: {status}.")]
    Stack { function: &'static str, status: i32 },

    #[error("Too many parameters")]
    TooManyParameters,

    #[error("Invalid parameters")]
    InvalidParameters,

    #[error("Unable to initialize the Bluetooth stack")]
    UnableToInitializeStack,

    #[error("Bluetooth stack is not initialized")]
    InvalidStackId,

    #[error("Unable to register server")]
    UnableToRegisterServer,
}

impl ShellError {
    /// Wrap a failed stack call, remembering which call it was
    pub fn stack(function: &'static str, err: StackError) -> Self {
        ShellError::Stack {
            function,
            status: err.status,
        }
    }

    /// Numeric code of this error as reported on the console
    pub fn code(&self) -> i32 {
        match self {
            ShellError::NoCommand => -1,
            ShellError::InvalidCommand(_) => -2,
            ShellError::FunctionError | ShellError::Stack { .. } => -4,
            ShellError::TooManyParameters => -5,
            ShellError::InvalidParameters => -6,
            ShellError::UnableToInitializeStack => -7,
            ShellError::InvalidStackId => -8,
            ShellError::UnableToRegisterServer => -9,
        }
    }
}

/// Failure to add a command to the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command table is full ({0} entries)")]
    Full(usize),

    #[error("command name is empty")]
    EmptyName,
}

/// Errors returned by the application entry point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Invalid driver or platform configuration: {0}")]
    InvalidParameters(String),

    #[error("Unable to open the stack: {0}")]
    UnableToOpenStack(ShellError),
}

impl ApplicationError {
    pub fn code(&self) -> i32 {
        match self {
            ApplicationError::InvalidParameters(_) => -1,
            ApplicationError::UnableToOpenStack(_) => -2,
        }
    }
}

impl From<ShellError> for ApplicationError {
    fn from(e: ShellError) -> Self {
        ApplicationError::UnableToOpenStack(e)
    }
}
