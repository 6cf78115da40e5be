//! Integration tests for placefmt pattern formatting

use placefmt::{
    fmt, placefmt, register_interpreter_fn, set_operator, try_fmt, Engine, ErrorKind, FormatError,
    FormatResult, TableInterpreter, Value, ValueFormatter,
};

fn strs(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

// ============================================================================
// Placeholders
// ============================================================================

mod placeholders {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_patterns_are_identity() {
        let patterns = [
            "",
            "plain text",
            "closing } brace",
            "tabs\tand\nnewlines",
            "ünïcödé",
        ];
        for pattern in patterns {
            assert_eq!(fmt(pattern, &[]), pattern);
            assert_eq!(fmt(pattern, &strs(&["ignored", "too"])), pattern);
        }
    }

    #[test]
    fn test_implicit_indexing() {
        assert_eq!(fmt("{} {}", &strs(&["a", "b"])), "a b");
        assert_eq!(placefmt!("{}-{}-{}", 1, 2.5, true), "1-2.5-true");
    }

    #[test]
    fn test_explicit_indexing() {
        assert_eq!(
            fmt("{1} {1}, {0}", &strs(&["world", "hello"])),
            "hello hello, world"
        );
    }

    #[test]
    fn test_mixed_indexing_is_an_error() {
        let out = fmt("{0} {}", &strs(&["a", "b"]));
        assert_eq!(out, FormatError::MixedIndexing.to_string());
        assert_eq!(
            try_fmt("{} {1}", &strs(&["a", "b"])).unwrap_err().kind(),
            ErrorKind::Index
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let out = fmt("{5}", &strs(&["a"]));
        assert!(out.contains("index 5 out of range"), "{}", out);
    }

    #[test]
    fn test_null_and_optional_values() {
        assert_eq!(placefmt!("{}|{}", None::<i32>, Some(3)), "null|3");
    }
}

// ============================================================================
// Value formatters
// ============================================================================

mod formatters {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_printf() {
        assert_eq!(placefmt!("{:%.2f}", 3.1415926), "3.14");
        assert_eq!(placefmt!("[{:%5d}]", 42), "[   42]");
        assert_eq!(placefmt!("{0:%x} {0:%#o}", 64), "40 0100");
    }

    #[test]
    fn test_mask() {
        assert_eq!(placefmt!("{:*}", "password"), "********");
        assert_eq!(placefmt!("{:*-3}", "password"), "---");
    }

    #[test]
    fn test_time() {
        assert_eq!(placefmt!("{:@date}", 86_400), "1970-01-02");
        assert_eq!(placefmt!("{:@h:m}", "3600"), "01:00");
    }

    #[test]
    fn test_oversized_specs_do_not_panic() {
        let patterns = [
            "{:%.70000f}",
            "{:%18446744073709551615d}",
            "{:*#18446744073709551615}",
        ];
        for pattern in patterns {
            let err = try_fmt(pattern, &[Value::from(1.5)]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::FormatterSpec, "{}", pattern);
            assert_eq!(fmt(pattern, &[Value::from(1.5)]), err.to_string());
        }
        assert_eq!(placefmt!("[{:%6.1f}]", 1.26), "[   1.3]");
    }

    #[test]
    fn test_custom_formatter() {
        #[derive(Default)]
        struct Brackets {
            open: String,
        }

        impl ValueFormatter for Brackets {
            fn parse(&mut self, spec: &str) -> FormatResult<()> {
                self.open = if spec.is_empty() {
                    "[".to_string()
                } else {
                    spec.to_string()
                };
                Ok(())
            }

            fn format(&self, value: &Value) -> String {
                format!("{}{}", self.open, value)
            }
        }

        let mut engine = Engine::new();
        engine.register_formatter_type::<Brackets>('b');
        assert_eq!(engine.format("{:b} {:b<<}", &strs(&["x", "y"])), "[x <<y");
    }
}

// ============================================================================
// Expressions
// ============================================================================

mod expressions {
    use super::*;
    use pretty_assertions::assert_eq;

    fn echo(key: &str, args: &[Value]) -> FormatResult<String> {
        match args.first() {
            Some(arg) => Ok(format!("{}:{}", key, arg)),
            None => Ok(key.to_string()),
        }
    }

    #[test]
    fn test_namespace_echo() {
        register_interpreter_fn("ItEcho", echo);
        assert_eq!(fmt("{{ItEcho::key}}", &[]), "key");
        assert_eq!(fmt("{{ItEcho::fn($0)}}", &strs(&["X"])), "fn:X");
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(fmt("{{'a' + 'b' + 'c'}}", &[]), "abc");
    }

    #[test]
    fn test_global_operator() {
        set_operator('~', |a: &str, b: &str| format!("{}~{}", a, b));
        assert_eq!(fmt("{{'a' ~ 'b'}}", &[]), "a~b");
    }

    #[test]
    fn test_localized_engine() {
        let english = TableInterpreter::default()
            .with("hello", "Hello")
            .with("name", "my name is {}");
        let engine = Engine::new()
            .with_interpreter("en", english)
            .with_default_interpreter("en")
            .with_operator('+', |a: &str, b: &str| format!("{} {}", a, b));

        assert_eq!(
            engine.format("{{hello + ',' + name($0)}}!", &strs(&["Ann"])),
            "Hello , my name is Ann!"
        );
    }

    #[test]
    fn test_syntax_errors_never_panic() {
        let engine = Engine::new().with_interpreter_fn("NS", echo);
        for pattern in ["{{", "{{'abc}}", "{{NS::}}", "{{a +}}", "{{f($x)}}", "{{a b}}", "{{}}"] {
            let err = engine.try_format(pattern, &[]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax, "{}", pattern);
        }
    }

    #[test]
    fn test_unknown_operator() {
        let err = try_fmt("{{'a' - 'b'}}", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(err.to_string().contains("invalid operator '-'"), "{}", err);
    }

    #[test]
    fn test_resolution_errors() {
        let engine = Engine::new();
        let err = engine.try_format("{{nowhere}}", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }
}
