// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

/// XTDB client error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A query builder was mutated after its first materialization.
    #[error("xtdb: query already sent")]
    AlreadySent,

    /// A query was materialized with no where-clauses.
    #[error("xtdb: query has no where clause")]
    MissingWhereClause,

    /// A wire parameter name outside the endpoint's whitelist.
    #[error("xtdb: unknown parameter: {0}")]
    UnknownParameter(String),

    /// Raw query text that is not a brace-delimited map.
    #[error("xtdb: invalid query text: {0}")]
    InvalidQuery(String),

    /// The server answered with a non-success HTTP status.
    #[error("xtdb server status {code}: {body}")]
    Status { code: u16, body: String },

    /// The request never produced a response.
    #[error("xtdb transport: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("xtdb: invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Error::InvalidResponse(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport(msg.into())
    }
}

/// Checks whether an error is an HTTP status error with the specified code.
pub fn is_status_error(err: &Error, code: u16) -> bool {
    matches!(err, Error::Status { code: c, .. } if *c == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_predicate_matches_code() {
        let err = Error::Status {
            code: 404,
            body: "not found".into(),
        };
        assert!(is_status_error(&err, 404));
        assert!(!is_status_error(&err, 400));
        assert!(!is_status_error(&Error::AlreadySent, 404));
    }

    #[test]
    fn display_includes_parameter_name() {
        let err = Error::UnknownParameter("bogus-field".into());
        assert_eq!(err.to_string(), "xtdb: unknown parameter: bogus-field");
    }
}
