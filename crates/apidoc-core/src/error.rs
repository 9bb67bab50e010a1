use thiserror::Error;

/// One bad token in the generator parameter string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("invalid parameter {0:?}: expected format of parameter to be k=v")]
    Malformed(String),

    #[error("unknown parameter {0:?}")]
    UnknownKey(String),
}

/// Every problem found in the parameter string. Generation does not start
/// when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_errors(.errors))]
pub struct ConfigError {
    pub errors: Vec<ParamError>,
}

fn join_errors(errors: &[ParamError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
