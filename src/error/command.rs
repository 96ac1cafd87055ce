//! Command error module.
//!
//! This module defines error types that may occur while parsing and
//! dispatching interactive commands. These errors are reported to the user
//! at the prompt; none of them terminate the session.

use thiserror::Error;

/// Errors that can occur during command parsing and dispatch.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Error when the command name is not registered.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Error when a required argument is missing.
    #[error("Command '{command}' is missing required argument: {argument}")]
    MissingArgument {
        /// The command being parsed
        command: String,
        /// The argument that was expected
        argument: String,
    },

    /// Error when an argument cannot be interpreted.
    #[error("Invalid argument '{value}' for {what}: {message}")]
    InvalidArgument {
        /// What the argument was for
        what: String,
        /// The offending value
        value: String,
        /// Why it was rejected
        message: String,
    },

    /// Error when an option flag is not recognized.
    #[error("Unknown option '{option}' for command '{command}'")]
    UnknownOption {
        /// The command being parsed
        command: String,
        /// The unrecognized flag
        option: String,
    },

    /// Error when a history re-execution index is out of bounds.
    #[error("Invalid history index: {0}")]
    InvalidHistoryIndex(String),
}
