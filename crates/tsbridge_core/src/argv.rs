//! Argument marshalling across the environment channel
//!
//! The child receives the compiler's argument vector through a single
//! string-valued environment variable. Each argument is wrapped in double
//! quotes and the list is joined with commas; embedded `"` and `\` are
//! backslash-escaped so no argument can collide with the framing.
//! `unmarshal` is the exact inverse and preserves order element-for-element.

use thiserror::Error;

/// Environment variable carrying the marshalled argument vector.
pub const COMMAND_VAR: &str = "TSBRIDGE_COMMAND";

/// Environment variable carrying the workspace root path.
pub const BUILD_DIR_VAR: &str = "TSBRIDGE_BUILD_DIR";

/// A marshalled payload that does not follow the framing convention.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarshalError {
    #[error("expected '\"' at byte {0} of argument payload")]
    ExpectedQuote(usize),
    #[error("unterminated argument starting at byte {0}")]
    Unterminated(usize),
    #[error("expected ',' between arguments at byte {0}")]
    ExpectedSeparator(usize),
    #[error("dangling escape at end of argument payload")]
    DanglingEscape,
}

/// Encode an argument vector into a single payload string.
pub fn marshal<S: AsRef<str>>(args: &[S]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        for c in arg.as_ref().chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
    out
}

/// Decode a payload string back into the original argument vector.
pub fn unmarshal(payload: &str) -> Result<Vec<String>, MarshalError> {
    let mut args = Vec::new();
    let mut chars = payload.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c != '"' {
            return Err(MarshalError::ExpectedQuote(start));
        }
        chars.next();

        let mut arg = String::new();
        loop {
            match chars.next() {
                Some((_, '"')) => break,
                Some((_, '\\')) => match chars.next() {
                    Some((_, escaped)) => arg.push(escaped),
                    None => return Err(MarshalError::DanglingEscape),
                },
                Some((_, c)) => arg.push(c),
                None => return Err(MarshalError::Unterminated(start)),
            }
        }
        args.push(arg);

        match chars.next() {
            None => break,
            Some((_, ',')) => {
                // Trailing comma means an empty final argument is missing
                if chars.peek().is_none() {
                    return Err(MarshalError::ExpectedQuote(payload.len()));
                }
            }
            Some((pos, _)) => return Err(MarshalError::ExpectedSeparator(pos)),
        }
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_safe_alphabet() {
        let args = vec![
            "/home/user/src/a.ts".to_string(),
            "/home/user/src/b.ts".to_string(),
            "--outDir".to_string(),
            "/home/user/dist".to_string(),
        ];
        assert_eq!(unmarshal(&marshal(&args)).unwrap(), args);
    }

    #[test]
    fn test_wire_format_matches_convention() {
        assert_eq!(marshal(&["a.ts", "--outDir", "dist"]), r#""a.ts","--outDir","dist""#);
    }

    #[test]
    fn test_order_preserved() {
        let args = vec!["c", "a", "b", "a"];
        assert_eq!(unmarshal(&marshal(&args)).unwrap(), args);
    }

    #[test]
    fn test_empty_vector() {
        assert_eq!(marshal::<&str>(&[]), "");
        assert_eq!(unmarshal("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_empty_argument() {
        let args = vec!["", "x", ""];
        assert_eq!(unmarshal(&marshal(&args)).unwrap(), args);
    }

    #[test]
    fn test_round_trip_hostile_characters() {
        let args = vec![
            r#"C:\Program Files\src"#.to_string(),
            r#"weird"name.ts"#.to_string(),
            "a,b,c".to_string(),
            r#"\"#.to_string(),
        ];
        assert_eq!(unmarshal(&marshal(&args)).unwrap(), args);
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        assert_eq!(unmarshal("a"), Err(MarshalError::ExpectedQuote(0)));
        assert_eq!(unmarshal("\"a"), Err(MarshalError::Unterminated(0)));
        assert_eq!(unmarshal("\"a\"\"b\""), Err(MarshalError::ExpectedSeparator(3)));
        assert_eq!(unmarshal("\"a\\"), Err(MarshalError::DanglingEscape));
        assert_eq!(unmarshal("\"a\","), Err(MarshalError::ExpectedQuote(4)));
    }
}
