//! Diagnostic message text, worded after the Docker builder's own errors.

pub fn instruction_casing() -> String {
    "Instructions should be written in uppercase letters".to_string()
}

pub fn directive_casing() -> String {
    "Parser directives should be written in lowercase letters".to_string()
}

pub fn unknown_instruction(keyword: &str) -> String {
    format!("Unknown instruction: {}", keyword.to_ascii_uppercase())
}

pub fn unknown_directive(name: &str) -> String {
    format!("Unknown directive: {name}")
}

pub fn invalid_escape(value: &str) -> String {
    format!("invalid ESCAPE '{value}'. Must be ` or \\")
}

pub fn no_source_image() -> String {
    "No source image provided with `FROM`".to_string()
}

pub fn argument_missing(keyword: &str) -> String {
    format!("{} requires at least one argument", keyword.to_ascii_uppercase())
}

pub fn requires_one(keyword: &str) -> String {
    format!("{} requires exactly one argument", keyword.to_ascii_uppercase())
}

pub fn requires_two(keyword: &str) -> String {
    format!("{} must have two arguments", keyword.to_ascii_uppercase())
}

pub fn requires_at_least_two(keyword: &str) -> String {
    format!("{} requires at least two arguments", keyword.to_ascii_uppercase())
}

pub fn requires_one_or_three() -> String {
    "FROM requires either one or three arguments".to_string()
}

pub fn argument_extra(value: &str) -> String {
    format!("Extra argument after the build stage name: {value}")
}

pub fn argument_unnecessary() -> String {
    "HEALTHCHECK NONE takes no arguments".to_string()
}

pub fn invalid_port(port: &str) -> String {
    format!("Invalid containerPort: {port}")
}

pub fn invalid_protocol(proto: &str) -> String {
    format!("Invalid proto: {proto}")
}

pub fn invalid_signal(signal: &str) -> String {
    format!("Invalid signal: {signal}")
}

pub fn flag_unknown(name: &str) -> String {
    format!("Unknown flag: {name}")
}

pub fn flag_duplicate(name: &str) -> String {
    format!("Duplicate flag specified: {name}")
}

pub fn flag_missing_value(name: &str) -> String {
    format!("Missing a value on flag: {name}")
}

pub fn flag_expected_boolean(name: &str, value: &str) -> String {
    format!("expecting boolean value for flag {name}, not: {value}")
}

pub fn invalid_duration(value: &str) -> String {
    format!("time: invalid duration {value}")
}

pub fn missing_duration_unit(value: &str) -> String {
    format!("time: missing unit in duration {value}")
}

pub fn unknown_duration_unit(unit: &str, value: &str) -> String {
    format!("time: unknown unit {unit} in duration {value}")
}

pub fn less_than_1ms(flag: &str) -> String {
    format!("Interval \"{flag}\" cannot be less than 1ms")
}

pub fn at_least_one_retry() -> String {
    "Maximum number of retries must be at least 1".to_string()
}

pub fn invalid_syntax(value: &str) -> String {
    format!("parsing \"{value}\": invalid syntax")
}

pub fn healthcheck_cmd_missing() -> String {
    "Missing command after HEALTHCHECK CMD".to_string()
}

pub fn shell_json_form() -> String {
    "SHELL requires the arguments to be in JSON form".to_string()
}

pub fn shell_requires_one() -> String {
    "SHELL requires at least one argument".to_string()
}

pub fn json_in_single_quotes() -> String {
    "Instruction arguments in JSON form must use double quotes".to_string()
}

pub fn unexpected_token(found: Option<char>) -> String {
    match found {
        Some(c) => format!("Unexpected token '{c}' in JSON array"),
        None => "Unexpected end of JSON array".to_string(),
    }
}

pub fn onbuild_chaining() -> String {
    "Chaining ONBUILD via `ONBUILD ONBUILD` isn't allowed".to_string()
}

pub fn onbuild_trigger(keyword: &str) -> String {
    format!("{} isn't allowed as an ONBUILD trigger", keyword.to_ascii_uppercase())
}

pub fn duplicate_stage(name: &str) -> String {
    format!("duplicate name {}", name.to_ascii_lowercase())
}

pub fn invalid_stage_name(name: &str) -> String {
    format!(
        "invalid name for build stage: \"{name}\", name can't start with a number or contain symbols"
    )
}

pub fn invalid_as() -> String {
    "Second argument should be AS".to_string()
}

pub fn missing_equals(name: &str) -> String {
    format!("Syntax error - can't find = in \"{name}\". Must be of the form: name=value")
}

pub fn missing_names(keyword: &str) -> String {
    format!("{} names can not be blank", keyword.to_ascii_uppercase())
}

pub fn missing_single_quote() -> String {
    "missing single quote".to_string()
}

pub fn missing_double_quote() -> String {
    "missing double quote".to_string()
}

pub fn deprecated_maintainer() -> String {
    "MAINTAINER has been deprecated".to_string()
}

pub fn multiple_instructions(keyword: &str) -> String {
    format!(
        "There can only be one {} instruction in a Dockerfile or build stage. Only the last one will have an effect.",
        keyword.to_ascii_uppercase()
    )
}

pub fn empty_continuation_line() -> String {
    "Empty continuation lines will become errors in a future release".to_string()
}
