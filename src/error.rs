//! Error types for rs-autoscrape.
//!
//! This module defines the error types returned by discovery operations.
//! Input errors abort a run, "no fields found" is a valid terminal outcome
//! for pages without repeating structure, and validation errors carry the
//! expansion branch that failed.

/// Error type for discovery operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A URL was required but an empty string was given.
    #[error("URL must not be empty")]
    EmptyUrl,

    /// The page could not be fetched.
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// Description of the failure.
        message: String,
    },

    /// The document could not be turned into a token stream.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// No field location survived merging and filtering.
    #[error("no fields found")]
    NoFieldsFound,

    /// The caller's selection kept none of the discovered fields.
    #[error("no fields selected")]
    NoFieldsSelected,

    /// A generated or configured selector is not valid in the selector dialect.
    #[error("invalid selector: {selector}")]
    InvalidSelector {
        /// The offending selector string.
        selector: String,
    },

    /// The labeler could not name a field.
    #[error("labeler failed for field {field}: {message}")]
    Labeler {
        /// Stringified location of the field being labelled.
        field: String,
        /// Description of the failure.
        message: String,
    },

    /// Replaying a candidate configuration failed during cluster expansion.
    #[error("validation of candidate {branch} (item selector `{selector}`) failed: {source}")]
    Validation {
        /// Identifier of the expansion branch.
        branch: String,
        /// Item selector of the rejected configuration.
        selector: String,
        /// Underlying engine error.
        source: Box<Error>,
    },

    /// Reading a local document failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_branch_and_selector() {
        let err = Error::Validation {
            branch: "ab".to_string(),
            selector: "body > ul > li".to_string(),
            source: Box::new(Error::InvalidSelector {
                selector: "li:".to_string(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("ab"));
        assert!(msg.contains("body > ul > li"));
        assert!(msg.contains("li:"));
    }

    #[test]
    fn no_fields_found_is_distinct_from_no_selection() {
        assert_ne!(Error::NoFieldsFound.to_string(), Error::NoFieldsSelected.to_string());
    }
}
