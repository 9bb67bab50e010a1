//! Generator parameters (`--apidoc_opt=k=v,k=v` on the protoc command line).

use crate::error::{ConfigError, ParamError};
use std::collections::BTreeMap;
use std::str::FromStr;

const PATH_PREFIX: &str = "path_prefix";
const IMPORT_PREFIX: &str = "M";
const GO_IMPORT_MAPPING_PREFIX: &str = "go_import_mapping@";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLineParams {
    /// Prepended to every documented method path.
    pub path_prefix: String,
    /// `.proto` file name → import path. Accepted for compatibility with Go
    /// generator invocations; not used in the rendered output.
    pub import_map: BTreeMap<String, String>,
}

impl CommandLineParams {
    /// Parse a comma-separated `key=value` list.
    ///
    /// All tokens are checked; every malformed token and unknown key is
    /// reported together. Empty tokens are skipped and a repeated key keeps
    /// its last value.
    pub fn parse(parameter: &str) -> Result<Self, ConfigError> {
        let mut params = Self::default();
        let mut errors = Vec::new();

        for token in parameter.split(',').filter(|t| !t.is_empty()) {
            let Some((key, value)) = token.split_once('=') else {
                errors.push(ParamError::Malformed(token.to_string()));
                continue;
            };
            if value.is_empty() {
                errors.push(ParamError::Malformed(key.to_string()));
                continue;
            }

            if key == PATH_PREFIX {
                params.path_prefix = value.to_string();
            } else if let Some(file) = key.strip_prefix(IMPORT_PREFIX) {
                params.import_map.insert(file.to_string(), value.to_string());
            } else if let Some(file) = key.strip_prefix(GO_IMPORT_MAPPING_PREFIX) {
                params.import_map.insert(file.to_string(), value.to_string());
            } else {
                errors.push(ParamError::UnknownKey(key.to_string()));
            }
        }

        if errors.is_empty() {
            Ok(params)
        } else {
            Err(ConfigError { errors })
        }
    }
}

impl FromStr for CommandLineParams {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
