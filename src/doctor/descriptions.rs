//! Purpose: Human-readable descriptions for validation error codes.
//! Exports: `describe`, `VALIDATION_DESCRIPTIONS`.
//! Role: Static lookup used by doctor checks to explain validation failures.
//! Invariants: Unknown codes and codes with an empty description fall back to the caller's message.

pub const VALIDATION_DESCRIPTIONS: &[(&str, &str)] = &[
    ("alternatives.base", "does not match any of the allowed alternatives"),
    ("any.empty", "must not be empty"),
    ("any.required", "is required"),
    ("any.unknown", ""),
    ("array.base", "must be an array"),
    ("any.allowOnly", ""),
    ("any.default", ""),
    ("any.invalid", ""),
    ("array.excludes", ""),
    ("array.excludesSingle", ""),
    ("array.includesRequiredBoth", ""),
    ("array.includesRequiredKnowns", ""),
    ("array.includesRequiredUnknowns", ""),
    ("array.includes", ""),
    ("array.includesSingle", ""),
    ("array.length", ""),
    ("array.max", ""),
    ("array.min", ""),
    ("array.orderedLength", ""),
    ("array.ref", ""),
    ("array.sparse", ""),
    ("array.unique", ""),
    ("binary.base", ""),
    ("binary.length", ""),
    ("binary.max", ""),
    ("binary.min", ""),
    ("boolean.base", "must be a boolean"),
    ("date.base", "must be a date"),
    ("date.greater", ""),
    ("date.isoDate", ""),
    ("date.less", ""),
    ("date.max", ""),
    ("date.min", ""),
    ("date.ref", ""),
    ("date.strict", ""),
    ("date.timestamp.javascript", ""),
    ("date.timestamp.unix", ""),
    ("function.arity", ""),
    ("function.base", "must be a function"),
    ("function.class", ""),
    ("function.maxArity", ""),
    ("function.minArity", ""),
    ("function.ref", ""),
    ("lazy.base", ""),
    ("lazy.schema", ""),
    ("number.base", "must be a number"),
    ("number.greater", ""),
    ("number.integer", ""),
    ("number.less", ""),
    ("number.max", ""),
    ("number.min", ""),
    ("number.multiple", ""),
    ("number.negative", ""),
    ("number.port", ""),
    ("number.positive", ""),
    ("number.precision", ""),
    ("number.ref", ""),
    ("number.unsafe", ""),
    ("object.allowUnknown", "is not an allowed field"),
    ("object.and", ""),
    ("object.assert", ""),
    ("object.base", "must be an object"),
    ("object.length", ""),
    ("object.max", ""),
    ("object.min", ""),
    ("object.missing", ""),
    ("object.nand", ""),
    ("object.rename.multiple", ""),
    ("object.rename.override", ""),
    ("object.rename.regex.multiple", ""),
    ("object.rename.regex.override", ""),
    ("object.schema", ""),
    ("object.type", ""),
    ("object.with", ""),
    ("object.without", ""),
    ("object.xor", ""),
    ("string.alphanum", ""),
    ("string.base64", ""),
    ("string.base", "must be a string"),
    ("string.creditCard", ""),
    ("string.dataUri", ""),
    ("string.email", ""),
    ("string.guid", ""),
    ("string.hexAlign", ""),
    ("string.hex", ""),
    ("string.hostname", ""),
    ("string.ipVersion", ""),
    ("string.ip", ""),
    ("string.isoDate", ""),
    ("string.length", ""),
    ("string.lowercase", ""),
    ("string.max", ""),
    ("string.min", ""),
    ("string.normalize", ""),
    ("string.ref", ""),
    ("string.regex.base", ""),
    ("string.regex.name", ""),
    ("string.regex.invert.base", ""),
    ("string.regex.invert.name", ""),
    ("string.token", ""),
    ("string.trim", ""),
    ("string.uppercase", ""),
    ("string.uri", ""),
    ("string.uriCustomScheme", ""),
    ("string.uriRelativeOnly", ""),
    ("symbol.base", ""),
    ("symbol.map", ""),
];

pub fn describe<'a>(code: &str, fallback: &'a str) -> &'a str {
    VALIDATION_DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, desc)| *desc)
        .filter(|desc| !desc.is_empty())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::{VALIDATION_DESCRIPTIONS, describe};
    use std::collections::HashSet;

    #[test]
    fn known_code_is_described() {
        assert_eq!(describe("any.required", "\"name\" is required"), "is required");
        assert_eq!(describe("object.base", "x"), "must be an object");
    }

    #[test]
    fn empty_description_falls_back_to_message() {
        assert_eq!(describe("number.port", "\"port\" must be a port"), "\"port\" must be a port");
    }

    #[test]
    fn unknown_code_falls_back_to_message() {
        assert_eq!(describe("custom.rule", "custom failure"), "custom failure");
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = HashSet::new();
        for (code, _) in VALIDATION_DESCRIPTIONS {
            assert!(seen.insert(*code), "duplicate code {code}");
        }
    }
}
