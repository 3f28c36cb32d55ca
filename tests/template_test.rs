use gt::funcs::FunctionLibrary;
use gt::template::Template;
use gt::value::from_json;
use serde_json::json;

fn exec(template: &str, data: serde_json::Value) -> String {
    let library = FunctionLibrary::default();
    let template = Template::parse(template, &library).unwrap();
    template.execute(&from_json(data)).unwrap()
}

fn exec_err(template: &str, data: serde_json::Value) -> String {
    let library = FunctionLibrary::default();
    let template = Template::parse(template, &library).unwrap();
    template.execute(&from_json(data)).unwrap_err().message
}

#[test]
fn test_range_over_map_is_sorted() {
    let data = json!({"delta": 4, "alpha": 1, "charlie": 3, "bravo": 2});
    for _ in 0..5 {
        assert_eq!(
            exec("{{range $k, $v := .}}{{$k}}={{$v}};{{end}}", data.clone()),
            "alpha=1;bravo=2;charlie=3;delta=4;"
        );
    }
}

#[test]
fn test_range_over_list_keeps_order() {
    let data = json!({"items": ["c", "a", "b"]});
    assert_eq!(exec("{{range $i, $v := .items}}{{$i}}{{$v}} {{end}}", data), "0c 1a 2b ");
}

#[test]
fn test_library_functions_shadow_engine_ones() {
    assert_eq!(exec("{{len 42}}", json!(null)), "0");
    assert_eq!(exec("{{len .}}", json!({"a": 1, "b": 2})), "2");
    assert_eq!(exec(r#"{{printf "%03d" 7}}"#, json!(null)), "007");
}

#[test]
fn test_engine_builtins_remain_available() {
    let data = json!({"name": "John", "tags": ["a", "b"]});
    assert_eq!(exec(r#"{{if and .name (not (empty .tags))}}ok{{end}}"#, data.clone()), "ok");
    assert_eq!(exec("{{index .tags 1}}", data), "b");
}

#[test]
fn test_integers_print_in_full() {
    let data = json!({"s": format!("{}y", "x".repeat(1_999_999)), "n": 1000000});
    assert_eq!(
        exec(r#"{{ 1000000 }}|{{ len .s }}|{{ .s | indexof "y" }}|{{ .n }}"#, data),
        "1000000|2000000|1999999|1000000"
    );
}

#[test]
fn test_missing_key_fails() {
    let message = exec_err("{{.user.missing}}", json!({"user": {"name": "John"}}));
    assert!(!message.is_empty());
}

#[test]
fn test_builtin_errors_reach_the_caller() {
    let message = exec_err("{{.name | substr 5 3}}", json!({"name": "Jo"}));
    assert!(message.contains("slice bounds out of range [5:8] with length 2"), "{message}");

    let message = exec_err(r#"{{.name | regexFind "("}}"#, json!({"name": "Jo"}));
    assert!(message.contains("regex parse error"), "{message}");
}

#[test]
fn test_parse_errors() {
    let library = FunctionLibrary::default();
    assert!(Template::parse("{{.a", &library).is_err());
    assert!(Template::parse("{{if .a}}unterminated", &library).is_err());
}

#[test]
fn test_deep_nesting_is_a_parse_error() {
    let library = FunctionLibrary::default();

    let parens = format!("{{{{ {}1{} }}}}", "(".repeat(50_000), ")".repeat(50_000));
    let err = Template::parse(&parens, &library).err().unwrap();
    assert!(err.message.contains("parentheses nested deeper than"), "{err}");

    let blocks = format!("{}x{}", "{{if 1}}".repeat(50_000), "{{end}}".repeat(50_000));
    let err = Template::parse(&blocks, &library).err().unwrap();
    assert!(err.message.contains("blocks nested deeper than"), "{err}");

    let shallow = format!("{{{{ {}1{} }}}}", "(".repeat(10), ")".repeat(10));
    assert_eq!(exec(&shallow, json!(null)), "1");
}
