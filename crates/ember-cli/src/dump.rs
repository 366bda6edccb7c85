//! A minimal indented-text AST dumper for `--dump-ast`.
//!
//! Not meant to be a stable machine-readable format; just enough to eyeball
//! what the parser produced while working on the grammar.

use ember_common::interner::Interner;
use ember_parser::ast::{Node, NodeKind};

pub fn format_node(node: &Node, interner: &Interner, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    match &node.kind {
        NodeKind::Literal(v) => format!("{pad}Literal({v:?})"),
        NodeKind::Variable(sym) => format!("{pad}Variable({})", interner.resolve(*sym)),
        NodeKind::Binary { left, right, op, ignore_left } => format!(
            "{pad}Binary({op:?}{})\n{}\n{}",
            if *ignore_left { ", ignore_left" } else { "" },
            format_node(left, interner, indent + 1),
            format_node(right, interner, indent + 1),
        ),
        NodeKind::Unary { right, op } => format!(
            "{pad}Unary({op:?})\n{}",
            format_node(right, interner, indent + 1)
        ),
        NodeKind::Assign { target, value } => format!(
            "{pad}Assign\n{}\n{}",
            format_node(target, interner, indent + 1),
            format_node(value, interner, indent + 1),
        ),
        NodeKind::Call { callee, args, objexpr } => {
            let mut s = format!("{pad}Call\n{}", format_node(callee, interner, indent + 1));
            for a in args {
                s.push('\n');
                s.push_str(&format_node(a, interner, indent + 1));
            }
            if let Some(obj) = objexpr {
                s.push('\n');
                s.push_str(&format_node(obj, interner, indent + 1));
            }
            s
        }
        NodeKind::Get { receiver, name, jump, ignore_result, .. } => format!(
            "{pad}Get(.{}{}{})\n{}",
            interner.resolve(*name),
            if *jump == 0 { ", null-safe" } else { "" },
            if *ignore_result { ", ignore_result" } else { "" },
            format_node(receiver, interner, indent + 1)
        ),
        NodeKind::Set { receiver, name, value } => format!(
            "{pad}Set(.{})\n{}\n{}",
            interner.resolve(*name),
            format_node(receiver, interner, indent + 1),
            format_node(value, interner, indent + 1),
        ),
        NodeKind::Subscript { array, index } => format!(
            "{pad}Subscript\n{}\n{}",
            format_node(array, interner, indent + 1),
            format_node(index, interner, indent + 1),
        ),
        NodeKind::Lambda { params, body } => format!(
            "{pad}Lambda({} params)\n{}",
            params.len(),
            format_node(body, interner, indent + 1)
        ),
        NodeKind::Array(elems) => {
            let mut s = format!("{pad}Array");
            for e in elems {
                s.push('\n');
                s.push_str(&format_node(e, interner, indent + 1));
            }
            s
        }
        NodeKind::Object { keys, values } => {
            let mut s = format!("{pad}Object");
            for (k, v) in keys.iter().zip(values.iter()) {
                s.push_str(&format!("\n{pad}  {}:", interner.resolve(*k)));
                s.push('\n');
                s.push_str(&format_node(v, interner, indent + 2));
            }
            s
        }
        NodeKind::This => format!("{pad}This"),
        NodeKind::Super { method, ignore_result } => format!(
            "{pad}Super(.{}{})",
            interner.resolve(*method),
            if *ignore_result { ", ignore_result" } else { "" }
        ),
        NodeKind::Range { from, to } => format!(
            "{pad}Range\n{}\n{}",
            format_node(from, interner, indent + 1),
            format_node(to, interner, indent + 1),
        ),
        NodeKind::Interpolation(parts) => {
            let mut s = format!("{pad}Interpolation");
            for p in parts {
                s.push('\n');
                s.push_str(&format_node(p, interner, indent + 1));
            }
            s
        }
        NodeKind::Reference(inner) => format!(
            "{pad}Reference\n{}",
            format_node(inner, interner, indent + 1)
        ),
        NodeKind::Ternary { cond, then_branch, else_branch } => format!(
            "{pad}Ternary\n{}\n{}\n{}",
            format_node(cond, interner, indent + 1),
            format_node(then_branch, interner, indent + 1),
            format_node(else_branch, interner, indent + 1),
        ),
        NodeKind::ExprStmt { expr, pop } => format!(
            "{pad}ExprStmt(pop={pop})\n{}",
            format_node(expr, interner, indent + 1)
        ),
        NodeKind::Block(stmts) => {
            let mut s = format!("{pad}Block");
            for st in stmts {
                s.push('\n');
                s.push_str(&format_node(st, interner, indent + 1));
            }
            s
        }
        NodeKind::VarDecl { name, init, constant } => {
            let mut s = format!(
                "{pad}{}Decl({})",
                if *constant { "Const" } else { "Var" },
                interner.resolve(*name)
            );
            if let Some(init) = init {
                s.push('\n');
                s.push_str(&format_node(init, interner, indent + 1));
            }
            s
        }
        NodeKind::If { cond, then_branch, elseif_conds, elseif_branches, else_branch } => {
            let mut s = format!(
                "{pad}If\n{}\n{}",
                format_node(cond, interner, indent + 1),
                format_node(then_branch, interner, indent + 1),
            );
            for (c, b) in elseif_conds.iter().zip(elseif_branches.iter()) {
                s.push('\n');
                s.push_str(&format_node(c, interner, indent + 1));
                s.push('\n');
                s.push_str(&format_node(b, interner, indent + 1));
            }
            if let Some(e) = else_branch {
                s.push('\n');
                s.push_str(&format_node(e, interner, indent + 1));
            }
            s
        }
        NodeKind::While { cond, body } => format!(
            "{pad}While\n{}\n{}",
            format_node(cond, interner, indent + 1),
            format_node(body, interner, indent + 1),
        ),
        NodeKind::For { init, cond, increment, body, loop_var, iterable } => {
            let mut s = format!("{pad}For");
            if let Some(name) = loop_var {
                s.push_str(&format!("({} in)", interner.resolve(*name)));
            }
            for maybe in [init, cond, increment] {
                if let Some(n) = maybe {
                    s.push('\n');
                    s.push_str(&format_node(n, interner, indent + 1));
                }
            }
            if let Some(it) = iterable {
                s.push('\n');
                s.push_str(&format_node(it, interner, indent + 1));
            }
            s.push('\n');
            s.push_str(&format_node(body, interner, indent + 1));
            s
        }
        NodeKind::Continue => format!("{pad}Continue"),
        NodeKind::Break => format!("{pad}Break"),
        NodeKind::FunctionDecl { name, params, body, exported } => format!(
            "{pad}FunctionDecl({}{}, {} params)\n{}",
            interner.resolve(*name),
            if *exported { ", exported" } else { "" },
            params.len(),
            format_node(body, interner, indent + 1),
        ),
        NodeKind::Return(value) => {
            let mut s = format!("{pad}Return");
            if let Some(v) = value {
                s.push('\n');
                s.push_str(&format_node(v, interner, indent + 1));
            }
            s
        }
        NodeKind::MethodDecl { name, params, body, is_static, is_operator } => format!(
            "{pad}MethodDecl({}{}{}, {} params)\n{}",
            interner.resolve(*name),
            if *is_static { ", static" } else { "" },
            if *is_operator { ", operator" } else { "" },
            params.len(),
            format_node(body, interner, indent + 1),
        ),
        NodeKind::ClassDecl { name, parent, members } => {
            let mut s = format!("{pad}ClassDecl({}", interner.resolve(*name));
            if let Some(p) = parent {
                s.push_str(&format!(" : {}", interner.resolve(*p)));
            }
            s.push(')');
            for m in members {
                s.push('\n');
                s.push_str(&format_node(m, interner, indent + 1));
            }
            s
        }
        NodeKind::FieldDecl { name, getter, setter, is_static, .. } => {
            let mut s = format!(
                "{pad}FieldDecl({}{})",
                interner.resolve(*name),
                if *is_static { ", static" } else { "" }
            );
            if let Some(g) = getter {
                s.push('\n');
                s.push_str(&format_node(g, interner, indent + 1));
            }
            if let Some(st) = setter {
                s.push('\n');
                s.push_str(&format_node(st, interner, indent + 1));
            }
            s
        }
    }
}
