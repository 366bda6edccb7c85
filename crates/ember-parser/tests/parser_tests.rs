use ember_parser::ast::NodeKind;
use ember_parser::parse;

#[test]
fn parses_var_decl_with_initializer() {
    let result = parse("var x = 1 + 2\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    assert_eq!(result.nodes.len(), 1);
    assert!(matches!(result.nodes[0].kind, NodeKind::VarDecl { .. }));
}

#[test]
fn parses_function_declaration() {
    let result = parse("function add(a, b) {\n  return a + b\n}\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::FunctionDecl { params, .. } => assert_eq!(params.len(), 2),
        other => panic!("expected FunctionDecl, got {other:?}"),
    }
}

#[test]
fn respects_precedence_in_binary_chains() {
    let result = parse("var x = 1 + 2 * 3\n");
    assert!(!result.had_error);
    let init = match &result.nodes[0].kind {
        NodeKind::VarDecl { init: Some(init), .. } => init,
        _ => panic!("expected VarDecl with init"),
    };
    match &init.kind {
        NodeKind::Binary { op, right, .. } => {
            assert_eq!(*op, ember_parser::ast::BinaryOp::Add);
            assert!(matches!(right.kind, NodeKind::Binary { .. }));
        }
        other => panic!("expected top-level Add, got {other:?}"),
    }
}

#[test]
fn disambiguates_grouping_from_lambda() {
    let result = parse("var f = (a, b) => a + b\nvar g = (1 + 2) * 3\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::VarDecl { init: Some(init), .. } => {
            assert!(matches!(init.kind, NodeKind::Lambda { .. }));
        }
        _ => panic!("expected lambda var decl"),
    }
    match &result.nodes[1].kind {
        NodeKind::VarDecl { init: Some(init), .. } => {
            assert!(matches!(init.kind, NodeKind::Binary { .. }));
        }
        _ => panic!("expected grouped-expression var decl"),
    }
}

#[test]
fn desugars_compound_assignment() {
    let result = parse("x += 1\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    let expr = match &result.nodes[0].kind {
        NodeKind::ExprStmt { expr, .. } => expr,
        other => panic!("expected ExprStmt, got {other:?}"),
    };
    match &expr.kind {
        NodeKind::Assign { value, .. } => {
            assert!(matches!(
                value.kind,
                NodeKind::Binary { ignore_left: true, .. }
            ));
        }
        other => panic!("expected desugared Assign, got {other:?}"),
    }
}

#[test]
fn parses_interpolated_string() {
    let result = parse("var greeting = $\"hi {name}!\"\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::VarDecl { init: Some(init), .. } => {
            match &init.kind {
                NodeKind::Interpolation(parts) => assert_eq!(parts.len(), 3),
                other => panic!("expected Interpolation, got {other:?}"),
            }
        }
        _ => panic!("expected var decl"),
    }
}

#[test]
fn parses_class_with_superclass_and_method() {
    let result = parse("class Dog : Animal {\n  function bark() {\n    return 1\n  }\n}\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::ClassDecl { parent, members, .. } => {
            assert!(parent.is_some());
            assert_eq!(members.len(), 1);
        }
        other => panic!("expected ClassDecl, got {other:?}"),
    }
}

#[test]
fn self_inherited_class_is_an_error() {
    let result = parse("class Foo : Foo {\n}\n");
    assert!(result.had_error);
}

#[test]
fn class_method_requires_function_keyword() {
    let result = parse("class Box {\n  bark() {\n    return 1\n  }\n}\n");
    assert!(result.had_error);
}

#[test]
fn class_method_with_fat_arrow_body_parses() {
    let result = parse("class A {\n  function f() => 1\n}\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
}

#[test]
fn new_expression_with_trailing_object_literal() {
    let result = parse("new Foo(1) { key = 2 }\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::ExprStmt { expr, .. } => match &expr.kind {
            NodeKind::Call { args, objexpr, .. } => {
                assert_eq!(args.len(), 1);
                match objexpr.as_deref().map(|n| &n.kind) {
                    Some(NodeKind::Object { keys, .. }) => assert_eq!(keys.len(), 1),
                    other => panic!("expected objexpr Object, got {other:?}"),
                }
            }
            other => panic!("expected Call, got {other:?}"),
        },
        other => panic!("expected ExprStmt, got {other:?}"),
    }
}

#[test]
fn new_expression_without_args_or_object_is_an_error() {
    let result = parse("new Foo\n");
    assert!(result.had_error);
}

#[test]
fn arrow_dot_parses_as_ignore_result_get() {
    let result = parse("a->b\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::ExprStmt { expr, .. } => match &expr.kind {
            NodeKind::Get { ignore_result, jump, .. } => {
                assert!(*ignore_result);
                assert_eq!(*jump, -1);
            }
            other => panic!("expected Get, got {other:?}"),
        },
        other => panic!("expected ExprStmt, got {other:?}"),
    }
}

#[test]
fn null_safe_dot_parses_as_jump_get() {
    let result = parse("a?.b\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::ExprStmt { expr, .. } => match &expr.kind {
            NodeKind::Get { jump, ignore_result, .. } => {
                assert_eq!(*jump, 0);
                assert!(!*ignore_result);
            }
            other => panic!("expected Get, got {other:?}"),
        },
        other => panic!("expected ExprStmt, got {other:?}"),
    }
}

#[test]
fn parenthesized_condition_followed_by_block_is_not_a_lambda() {
    let result = parse("if (x < 10) {\n}\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    assert!(matches!(result.nodes[0].kind, NodeKind::If { .. }));
}

#[test]
fn default_argument_cannot_precede_non_default() {
    let result = parse("function f(a = 1, b) {\n}\n");
    assert!(result.had_error);
}

#[test]
fn variadic_parameter_must_be_last() {
    let result = parse("function f(...rest, x) {\n}\n");
    assert!(result.had_error);
}

#[test]
fn getter_and_setter_merge_into_one_field() {
    let result = parse(
        "class Box {\n  get value { return 1 }\n  set value(v) { }\n}\n",
    );
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::ClassDecl { members, .. } => {
            assert_eq!(members.len(), 1);
            match &members[0].kind {
                NodeKind::FieldDecl { getter, setter, .. } => {
                    assert!(getter.is_some());
                    assert!(setter.is_some());
                }
                other => panic!("expected FieldDecl, got {other:?}"),
            }
        }
        other => panic!("expected ClassDecl, got {other:?}"),
    }
}

#[test]
fn break_outside_loop_is_an_error() {
    let result = parse("break\n");
    assert!(result.had_error);
}

#[test]
fn for_in_loop_parses() {
    let result = parse("for item in items {\n  x = item\n}\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::For { loop_var, iterable, .. } => {
            assert!(loop_var.is_some());
            assert!(iterable.is_some());
        }
        other => panic!("expected For, got {other:?}"),
    }
}

#[test]
fn c_style_for_loop_parses() {
    let result = parse("for (var i = 0; i < 10; i += 1) {\n}\n");
    assert!(!result.had_error, "{:?}", result.diagnostics);
    match &result.nodes[0].kind {
        NodeKind::For { init, cond, increment, .. } => {
            assert!(init.is_some());
            assert!(cond.is_some());
            assert!(increment.is_some());
        }
        other => panic!("expected For, got {other:?}"),
    }
}
