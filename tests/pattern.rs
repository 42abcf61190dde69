use mimir_router::{ParamValue, Pattern, PatternError};

fn single(value: &str) -> ParamValue {
    ParamValue::Single(value.to_string())
}

fn many(values: &[&str]) -> ParamValue {
    ParamValue::Many(values.iter().map(|value| value.to_string()).collect())
}

macro_rules! match_tests {
    ($($name:ident: $pattern:literal => {
        $( $url:literal => $expected:expr ),* $(,)?
    })*) => {$(
        #[test]
        fn $name() {
            let pattern = Pattern::parse($pattern).unwrap();

            $({
                let expected: Option<Vec<(&str, ParamValue)>> = $expected;
                let matched = pattern.matches($url);
                let got = matched.as_ref().map(|params| {
                    params
                        .iter()
                        .map(|(key, value)| (key, value.clone()))
                        .collect::<Vec<_>>()
                });

                assert_eq!(
                    got, expected,
                    "url {:?} against pattern {:?}",
                    $url, $pattern,
                );
            })*
        }
    )*};
}

match_tests! {
    root: "" => {
        "" => Some(vec![]),
        "home" => None,
        "/" => None,
    }

    literal_only: "settings" => {
        "settings" => Some(vec![]),
        "settings/general" => None,
        "setting" => None,
        "" => None,
    }

    nested_literals: "docs/guide" => {
        "docs/guide" => Some(vec![]),
        "docs" => None,
        "docs/guide/intro" => None,
        "docs/other" => None,
    }

    single_param: "view/:name" => {
        "view/report" => Some(vec![("name", single("report"))]),
        "view/hello%20world" => Some(vec![("name", single("hello world"))]),
        "view" => None,
        "view/" => None,
        "view/a/b" => None,
    }

    multiple_params: "blog/:category/:post" => {
        "blog/rust/routers" => Some(vec![
            ("category", single("rust")),
            ("post", single("routers")),
        ]),
        "blog/rust" => None,
        "blog/rust/routers/comments" => None,
    }

    catch_all: "edit/:path+" => {
        "edit/a.mimir" => Some(vec![("path", many(&["a.mimir"]))]),
        "edit/docs/a.mimir" => Some(vec![("path", many(&["docs", "a.mimir"]))]),
        "edit/a/b/c/d" => Some(vec![("path", many(&["a", "b", "c", "d"]))]),
        "edit" => None,
        "edit/" => None,
        "edit/docs//a.mimir" => None,
        "view/docs/a.mimir" => None,
    }

    bare_catch_all: ":path+" => {
        "a" => Some(vec![("path", many(&["a"]))]),
        "a/b" => Some(vec![("path", many(&["a", "b"]))]),
        "" => None,
    }

    param_then_literal: ":section/index" => {
        "docs/index" => Some(vec![("section", single("docs"))]),
        "docs/other" => None,
        "docs" => None,
    }

    decoding: "open/:name+" => {
        "open/my%2Ffile" => Some(vec![("name", many(&["my/file"]))]),
        "open/caf%C3%A9/r%C3%A9sum%C3%A9" => Some(vec![("name", many(&["café", "résumé"]))]),
        // Malformed percent escapes fail the match instead of panicking.
        "open/bad%zz" => None,
        "open/truncated%2" => None,
        // Decodes to invalid UTF-8.
        "open/%ff" => None,
    }
}

#[test]
fn literal_segments_compare_raw() {
    // "%20" in a literal segment is not decoded on either side.
    let pattern = Pattern::parse("a%20b/:x").unwrap();
    let params = pattern.matches("a%20b/c").unwrap();
    assert_eq!(params.get("x"), Some("c"));
    assert!(pattern.matches("a b/c").is_none());
}

#[test]
fn catch_all_preserves_order() {
    let pattern = Pattern::parse("view/:path+").unwrap();
    let params = pattern.matches("view/z/a/m").unwrap();
    assert_eq!(
        params.get_many("path"),
        Some(&["z".to_string(), "a".to_string(), "m".to_string()][..])
    );
}

#[test]
fn parse_errors() {
    assert_eq!(Pattern::parse("a/:"), Err(PatternError::UnnamedParam));
    assert_eq!(Pattern::parse("a/:+"), Err(PatternError::UnnamedParam));
    assert_eq!(
        Pattern::parse("a/:rest+/b"),
        Err(PatternError::InvalidCatchAll)
    );
}

#[test]
fn parse_error_display() {
    assert_eq!(
        PatternError::UnnamedParam.to_string(),
        "parameters must be registered with a name"
    );
    assert_eq!(
        PatternError::InvalidCatchAll.to_string(),
        "catch-all parameters are only allowed at the end of a pattern"
    );
}
