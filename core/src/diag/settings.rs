use serde::{Deserialize, Serialize};

/// User-selectable severity for configurable checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Ignore,
    #[default]
    Warning,
    Error,
}

/// Severities of the configurable checks, as found under `diagnostics` in client settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorSettings {
    pub deprecated_maintainer: SeverityLevel,
    pub directive_casing: SeverityLevel,
    pub empty_continuation_line: SeverityLevel,
    pub instruction_casing: SeverityLevel,
    pub instruction_cmd_multiple: SeverityLevel,
    pub instruction_entrypoint_multiple: SeverityLevel,
    pub instruction_healthcheck_multiple: SeverityLevel,
    #[serde(rename = "instructionJSONInSingleQuotes")]
    pub instruction_json_in_single_quotes: SeverityLevel,
}
