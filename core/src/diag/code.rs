use std::fmt;
use std::str::FromStr;

/// Stable diagnostic codes. The string forms are part of the quick-fix protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    CasingInstruction,
    CasingDirective,
    ArgumentMissing,
    ArgumentRequiresOne,
    ArgumentRequiresTwo,
    ArgumentRequiresAtLeastTwo,
    ArgumentRequiresOneOrThree,
    ArgumentUnnecessary,
    ArgumentExtra,
    UnknownInstruction,
    UnknownDirective,
    InvalidEscapeDirective,
    InvalidPort,
    InvalidProtocol,
    InvalidSignal,
    FlagUnknown,
    FlagDuplicate,
    FlagMissingValue,
    FlagExpectedBooleanValue,
    FlagInvalidDuration,
    FlagMissingDuration,
    FlagUnknownUnit,
    FlagLessThan1ms,
    FlagAtLeastOneRetry,
    InvalidSyntax,
    HealthcheckCmdArgumentMissing,
    ShellJsonForm,
    ShellRequiresOne,
    JsonInSingleQuotes,
    UnexpectedToken,
    OnbuildTriggerDisallowed,
    OnbuildChainingDisallowed,
    DuplicateBuildStageName,
    InvalidBuildStageName,
    InvalidAs,
    SyntaxMissingEquals,
    SyntaxMissingNames,
    SyntaxMissingSingleQuote,
    SyntaxMissingDoubleQuote,
    DeprecatedMaintainer,
    NoSourceImage,
    MultipleInstructions,
    EmptyContinuationLine,
}

impl DiagnosticCode {
    pub const ALL: [DiagnosticCode; 43] = [
        DiagnosticCode::CasingInstruction,
        DiagnosticCode::CasingDirective,
        DiagnosticCode::ArgumentMissing,
        DiagnosticCode::ArgumentRequiresOne,
        DiagnosticCode::ArgumentRequiresTwo,
        DiagnosticCode::ArgumentRequiresAtLeastTwo,
        DiagnosticCode::ArgumentRequiresOneOrThree,
        DiagnosticCode::ArgumentUnnecessary,
        DiagnosticCode::ArgumentExtra,
        DiagnosticCode::UnknownInstruction,
        DiagnosticCode::UnknownDirective,
        DiagnosticCode::InvalidEscapeDirective,
        DiagnosticCode::InvalidPort,
        DiagnosticCode::InvalidProtocol,
        DiagnosticCode::InvalidSignal,
        DiagnosticCode::FlagUnknown,
        DiagnosticCode::FlagDuplicate,
        DiagnosticCode::FlagMissingValue,
        DiagnosticCode::FlagExpectedBooleanValue,
        DiagnosticCode::FlagInvalidDuration,
        DiagnosticCode::FlagMissingDuration,
        DiagnosticCode::FlagUnknownUnit,
        DiagnosticCode::FlagLessThan1ms,
        DiagnosticCode::FlagAtLeastOneRetry,
        DiagnosticCode::InvalidSyntax,
        DiagnosticCode::HealthcheckCmdArgumentMissing,
        DiagnosticCode::ShellJsonForm,
        DiagnosticCode::ShellRequiresOne,
        DiagnosticCode::JsonInSingleQuotes,
        DiagnosticCode::UnexpectedToken,
        DiagnosticCode::OnbuildTriggerDisallowed,
        DiagnosticCode::OnbuildChainingDisallowed,
        DiagnosticCode::DuplicateBuildStageName,
        DiagnosticCode::InvalidBuildStageName,
        DiagnosticCode::InvalidAs,
        DiagnosticCode::SyntaxMissingEquals,
        DiagnosticCode::SyntaxMissingNames,
        DiagnosticCode::SyntaxMissingSingleQuote,
        DiagnosticCode::SyntaxMissingDoubleQuote,
        DiagnosticCode::DeprecatedMaintainer,
        DiagnosticCode::NoSourceImage,
        DiagnosticCode::MultipleInstructions,
        DiagnosticCode::EmptyContinuationLine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::CasingInstruction => "casing-instruction",
            DiagnosticCode::CasingDirective => "casing-directive",
            DiagnosticCode::ArgumentMissing => "argument-missing",
            DiagnosticCode::ArgumentRequiresOne => "argument-requires-one",
            DiagnosticCode::ArgumentRequiresTwo => "argument-requires-two",
            DiagnosticCode::ArgumentRequiresAtLeastTwo => "argument-requires-at-least-two",
            DiagnosticCode::ArgumentRequiresOneOrThree => "argument-requires-one-or-three",
            DiagnosticCode::ArgumentUnnecessary => "argument-unnecessary",
            DiagnosticCode::ArgumentExtra => "argument-extra",
            DiagnosticCode::UnknownInstruction => "unknown-instruction",
            DiagnosticCode::UnknownDirective => "unknown-directive",
            DiagnosticCode::InvalidEscapeDirective => "invalid-escape-directive",
            DiagnosticCode::InvalidPort => "invalid-port",
            DiagnosticCode::InvalidProtocol => "invalid-protocol",
            DiagnosticCode::InvalidSignal => "invalid-signal",
            DiagnosticCode::FlagUnknown => "flag-unknown",
            DiagnosticCode::FlagDuplicate => "flag-duplicate",
            DiagnosticCode::FlagMissingValue => "flag-missing-value",
            DiagnosticCode::FlagExpectedBooleanValue => "flag-expected-boolean-value",
            DiagnosticCode::FlagInvalidDuration => "flag-invalid-duration",
            DiagnosticCode::FlagMissingDuration => "flag-missing-duration",
            DiagnosticCode::FlagUnknownUnit => "flag-unknown-unit",
            DiagnosticCode::FlagLessThan1ms => "flag-less-than-1ms",
            DiagnosticCode::FlagAtLeastOneRetry => "flag-at-least-one-retry",
            DiagnosticCode::InvalidSyntax => "invalid-syntax",
            DiagnosticCode::HealthcheckCmdArgumentMissing => "healthcheck-cmd-argument-missing",
            DiagnosticCode::ShellJsonForm => "shell-json-form",
            DiagnosticCode::ShellRequiresOne => "shell-requires-one",
            DiagnosticCode::JsonInSingleQuotes => "json-in-single-quotes",
            DiagnosticCode::UnexpectedToken => "unexpected-token",
            DiagnosticCode::OnbuildTriggerDisallowed => "onbuild-trigger-disallowed",
            DiagnosticCode::OnbuildChainingDisallowed => "onbuild-chaining-disallowed",
            DiagnosticCode::DuplicateBuildStageName => "duplicate-build-stage-name",
            DiagnosticCode::InvalidBuildStageName => "invalid-build-stage-name",
            DiagnosticCode::InvalidAs => "invalid-as",
            DiagnosticCode::SyntaxMissingEquals => "syntax-missing-equals",
            DiagnosticCode::SyntaxMissingNames => "syntax-missing-names",
            DiagnosticCode::SyntaxMissingSingleQuote => "syntax-missing-single-quote",
            DiagnosticCode::SyntaxMissingDoubleQuote => "syntax-missing-double-quote",
            DiagnosticCode::DeprecatedMaintainer => "deprecated-maintainer",
            DiagnosticCode::NoSourceImage => "no-source-image",
            DiagnosticCode::MultipleInstructions => "multiple-instructions",
            DiagnosticCode::EmptyContinuationLine => "empty-continuation-line",
        }
    }

    /// Codes whose finding marks text as unnecessary rather than wrong.
    pub fn is_unnecessary(&self) -> bool {
        matches!(
            self,
            DiagnosticCode::EmptyContinuationLine
                | DiagnosticCode::ArgumentUnnecessary
                | DiagnosticCode::MultipleInstructions
        )
    }

    pub fn is_deprecation(&self) -> bool {
        matches!(self, DiagnosticCode::DeprecatedMaintainer)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode(pub String);

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown diagnostic code: {}", self.0)
    }
}

impl std::error::Error for UnknownCode {}

impl FromStr for DiagnosticCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}
