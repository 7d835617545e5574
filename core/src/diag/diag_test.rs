#[cfg(test)]
mod tests {
    use crate::diag::{
        DiagnosticCode, Emitter, Severity, SeverityLevel, ValidatorSettings,
    };
    use crate::text::{Document, Span};

    #[test]
    fn codes_round_trip_through_strings() {
        for code in DiagnosticCode::ALL {
            assert_eq!(code.as_str().parse::<DiagnosticCode>(), Ok(code));
        }
        assert!("no-such-code".parse::<DiagnosticCode>().is_err());
    }

    #[test]
    fn settings_deserialize_camel_case() {
        let settings: ValidatorSettings = serde_json::from_value(serde_json::json!({
            "deprecatedMaintainer": "ignore",
            "instructionJSONInSingleQuotes": "error",
        }))
        .unwrap();
        assert_eq!(settings.deprecated_maintainer, SeverityLevel::Ignore);
        assert_eq!(settings.instruction_json_in_single_quotes, SeverityLevel::Error);
        assert_eq!(settings.instruction_casing, SeverityLevel::Warning);
    }

    #[test]
    fn ignore_suppresses_configured_findings() {
        let doc = Document::new("MAINTAINER me");
        let settings = ValidatorSettings::default();
        let mut emitter = Emitter::new(&doc, &settings);
        emitter.push_configured(
            SeverityLevel::Ignore,
            DiagnosticCode::DeprecatedMaintainer,
            Span::new(0, 10),
            String::new(),
        );
        assert!(emitter.is_empty());
        emitter.push_configured(
            SeverityLevel::Error,
            DiagnosticCode::DeprecatedMaintainer,
            Span::new(0, 10),
            String::new(),
        );
        assert_eq!(emitter.finish()[0].severity, Severity::Error);
    }

    #[test]
    fn spans_are_clamped_and_widened() {
        let doc = Document::new("FROM");
        let settings = ValidatorSettings::default();
        let mut emitter = Emitter::new(&doc, &settings);
        emitter.push(DiagnosticCode::NoSourceImage, Span::new(2, 99), String::new());
        emitter.push(DiagnosticCode::ArgumentMissing, Span::empty(4), String::new());
        emitter.push(DiagnosticCode::UnknownDirective, Span::empty(0), String::new());
        let diags = emitter.finish();
        assert_eq!(diags[0].span, Span::new(0, 1));
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[1].span, Span::new(2, 4));
        assert_eq!(diags[2].span, Span::new(3, 4));
        assert!(diags.iter().all(|d| d.span.end <= doc.len()));
    }
}
