//! Statement and control-flow translation.

use j2py_core::J2PyPipeline;

fn transpile(source: &str) -> String {
    J2PyPipeline::new()
        .transpile(source)
        .expect("transpilation should succeed")
}

#[test]
fn test_if_else_if_chain_becomes_elif() {
    let java = r#"
class C {
    int sign(int a) {
        if (a > 0) { return 1; } else if (a < 0) { return -1; } else { return 0; }
    }
}
"#;
    let python = transpile(java);
    assert!(python.contains("if a > 0:"), "Got:\n{python}");
    assert!(python.contains("elif a < 0:"), "Got:\n{python}");
    assert!(python.contains("else:"), "Got:\n{python}");
    assert!(python.contains("return -1"), "Got:\n{python}");
}

#[test]
fn test_else_block_that_is_not_an_if_stays_else() {
    let java = "class C { void f(int a) { if (a > 0) { a = 1; } else { a = 2; } } }";
    let python = transpile(java);
    assert!(python.contains("else:"), "Got:\n{python}");
    assert!(!python.contains("elif"), "Got:\n{python}");
}

#[test]
fn test_while_with_empty_body_emits_pass() {
    let python = transpile("class C { void spin(boolean busy) { while (busy) { } } }");
    assert!(python.contains("while busy:\n            pass"), "Got:\n{python}");
}

#[test]
fn test_classic_for_lowers_to_while() {
    let java = r#"
class C {
    void count() {
        int x = 0;
        for (int i = 0; i < 5; i++) { x = x + 1; }
    }
}
"#;
    let python = transpile(java);
    assert!(python.contains("i = 0"), "Got:\n{python}");
    assert!(python.contains("while i < 5:"), "Got:\n{python}");
    assert!(python.contains("x = x + 1"), "Got:\n{python}");
    assert!(python.contains("i += 1"), "Got:\n{python}");
    // the update clause runs after the body
    let body = python.find("x = x + 1").unwrap();
    let update = python.find("i += 1").unwrap();
    assert!(body < update, "Got:\n{python}");
}

#[test]
fn test_for_without_condition_loops_forever() {
    let python = transpile("class C { void f() { for (;;) { work(); } } }");
    assert!(python.contains("while True:"), "Got:\n{python}");
    assert!(python.contains("work()"), "Got:\n{python}");
}

#[test]
fn test_enhanced_for_keeps_its_shape() {
    let java = r#"
class C {
    void all(int[] items) {
        for (int item : items) {
            System.out.println(item);
        }
    }
}
"#;
    let python = transpile(java);
    assert!(python.contains("for item in items:"), "Got:\n{python}");
    assert!(python.contains("print(item)"), "Got:\n{python}");
}

#[test]
fn test_do_while_executes_body_once_before_the_check() {
    let python = transpile("class C { void pump(int i) { do { i++; } while (i < 3); } }");
    assert!(python.contains("while True:"), "Got:\n{python}");
    assert!(python.contains("i += 1"), "Got:\n{python}");
    assert!(python.contains("if not (i < 3):"), "Got:\n{python}");
    assert!(python.contains("break"), "Got:\n{python}");
    let body = python.find("i += 1").unwrap();
    let check = python.find("if not (i < 3):").unwrap();
    assert!(body < check, "Got:\n{python}");
}

#[test]
fn test_switch_fallthrough_labels_share_one_body() {
    let java = r#"
class C {
    void pick(int x) {
        switch (x) {
            case 1:
            case 2:
                System.out.println(x);
                break;
            default:
                System.out.println(0);
        }
    }
}
"#;
    let python = transpile(java);
    assert!(python.contains("match x:"), "Got:\n{python}");
    assert!(
        python.contains("case 1:\n            case 2:\n"),
        "Got:\n{python}"
    );
    assert_eq!(python.matches("print(x)").count(), 1, "Got:\n{python}");
    assert!(python.contains("case _:"), "Got:\n{python}");
    // break is redundant under match and is dropped entirely
    assert!(!python.contains("break"), "Got:\n{python}");
}

#[test]
fn test_switch_without_default_gets_a_synthetic_arm() {
    let java = "class C { void f(int x) { switch (x) { case 1: run(); break; } } }";
    let python = transpile(java);
    assert!(
        python.contains("case _:\n                pass"),
        "Got:\n{python}"
    );
}

#[test]
fn test_try_catch_finally() {
    let java = r#"
class C {
    void io() {
        try { open(); } catch (IOException e) { } finally { close(); }
    }
}
"#;
    let python = transpile(java);
    assert!(python.contains("try:"), "Got:\n{python}");
    assert!(python.contains("open()"), "Got:\n{python}");
    assert!(python.contains("except IOException as e:"), "Got:\n{python}");
    assert!(python.contains("pass"), "Got:\n{python}");
    assert!(python.contains("finally:"), "Got:\n{python}");
    assert!(python.contains("close()"), "Got:\n{python}");
}

#[test]
fn test_catch_exception_stays_exception() {
    let java = "class C { void f() { try { run(); } catch (Exception e) { handle(e); } } }";
    let python = transpile(java);
    assert!(python.contains("except Exception as e:"), "Got:\n{python}");
    assert!(python.contains("handle(e)"), "Got:\n{python}");
}

#[test]
fn test_throw_becomes_raise() {
    let java = r#"class C { void boom() { throw new IllegalStateException("bad"); } }"#;
    let python = transpile(java);
    assert!(
        python.contains("raise IllegalStateException(\"bad\")"),
        "Got:\n{python}"
    );
}

#[test]
fn test_bare_return() {
    let python = transpile("class C { void f() { return; } }");
    assert!(python.contains("\n        return\n"), "Got:\n{python}");
}

#[test]
fn test_empty_statements_contribute_nothing() {
    let python = transpile("class C { void f() { ;;; } }");
    assert!(python.contains("def f(self):\n        pass"), "Got:\n{python}");
}

#[test]
fn test_uninitialized_locals_get_defaults() {
    let python = transpile("class C { void f() { int a[]; int b; } }");
    assert!(python.contains("a = []"), "Got:\n{python}");
    assert!(python.contains("b = None"), "Got:\n{python}");
}

#[test]
fn test_multi_declarator_locals_emit_one_line_each() {
    let python = transpile("class C { void f() { int a = 1, b = 2; } }");
    assert!(python.contains("\n        a = 1\n"), "Got:\n{python}");
    assert!(python.contains("\n        b = 2\n"), "Got:\n{python}");
}

#[test]
fn test_unsupported_statement_passes_through_verbatim() {
    let java = "class C { void f() { synchronized (this) { touch(); } } }";
    let python = transpile(java);
    assert!(python.contains("synchronized (this)"), "Got:\n{python}");
}

#[test]
fn test_nested_block_is_flattened() {
    let python = transpile("class C { void f() { { int a = 1; } } }");
    assert!(python.contains("\n        a = 1\n"), "Got:\n{python}");
}
