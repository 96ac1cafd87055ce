//! Error module for the Makai Directory Manager.
//!
//! This module provides the error handling framework for the whole
//! application: explicit error types per subsystem, a top-level error enum
//! they convert into, and a pluggable reporting seam for surfacing errors
//! with context.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use once_cell::sync::OnceCell;
use thiserror::Error;

pub mod command;
pub mod config;
pub mod scan;

use crate::data_structures::KoaTrieError;

/// Result type alias used throughout the Makai Directory Manager.
pub type MakaiResult<T> = Result<T, MakaiError>;

/// Core error enum for the Makai Directory Manager.
#[derive(Error, Debug)]
pub enum MakaiError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors from parsing or dispatching interactive commands.
    #[error("Command error: {0}")]
    Command(#[from] command::CommandError),

    /// Errors from walking directories into the index.
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),

    /// Errors from the path trie.
    #[error("Index error: {0}")]
    Trie(#[from] KoaTrieError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: MakaiError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<S: Into<String>>(error: MakaiError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    ///
    /// # Arguments
    ///
    /// * `details` - Additional context information to help with debugging
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    ///
    /// # Arguments
    ///
    /// * `context` - The error context to report
    fn report(&self, context: ErrorContext);
}

/// A simple error reporter implementation that logs errors using the tracing framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}

/// Global error reporter instance.
static ERROR_REPORTER: OnceCell<Arc<dyn ErrorReporter>> = OnceCell::new();

/// Set the global error reporter. A reporter can be installed once; later
/// calls are ignored with a warning.
///
/// # Arguments
///
/// * `reporter` - The error reporter to use
pub fn set_error_reporter(reporter: Arc<dyn ErrorReporter>) {
    if ERROR_REPORTER.set(reporter).is_err() {
        tracing::warn!("Error reporter was already installed, ignoring replacement");
    }
}

/// Report an error with context through the global reporter.
///
/// Falls back to standard error output when no reporter is installed.
///
/// # Arguments
///
/// * `context` - The error context to report
pub fn report_error(context: ErrorContext) {
    match ERROR_REPORTER.get() {
        Some(reporter) => reporter.report(context),
        None => eprintln!("Error: {context}"),
    }
}
