//! Pure functions for reading swc AST nodes.

use swc_ecma_ast::{
    CallExpr, Callee, Expr, JSXAttrName, JSXElementName, JSXMemberExpr, JSXObject, Lit,
    MemberProp, ObjectLit, Pat, Prop, PropName, PropOrSpread,
};

/// Unwrap TypeScript-specific expression wrappers to get the inner expression.
pub fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::TsNonNull(non_null) => unwrap_ts_expr(&non_null.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

/// String literal or template literal without substitutions.
pub fn static_string(expr: &Expr) -> Option<String> {
    match unwrap_ts_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(|s| s.to_string())),
        _ => None,
    }
}

/// Extract property name from a PropName node.
pub fn extract_prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

/// Value of the `name: value` property of an object literal. Spreads are skipped.
pub fn object_prop<'a>(obj: &'a ObjectLit, name: &str) -> Option<&'a Expr> {
    obj.props.iter().find_map(|prop| match prop {
        PropOrSpread::Prop(prop) => match &**prop {
            Prop::KeyValue(kv) if extract_prop_name(&kv.key).as_deref() == Some(name) => {
                Some(&*kv.value)
            }
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    })
}

/// Identifier named by the `name` property, including the `{ name }` shorthand.
pub fn object_ident_prop(obj: &ObjectLit, name: &str) -> Option<String> {
    let shorthand = obj.props.iter().find_map(|prop| match prop {
        PropOrSpread::Prop(prop) => match &**prop {
            Prop::Shorthand(ident) if ident.sym.as_str() == name => Some(ident.sym.to_string()),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    });
    shorthand.or_else(|| match object_prop(obj, name).map(unwrap_ts_expr) {
        Some(Expr::Ident(ident)) => Some(ident.sym.to_string()),
        _ => None,
    })
}

/// The first argument of a call when it is an object literal.
pub fn first_object_arg(call: &CallExpr) -> Option<&ObjectLit> {
    call.args
        .first()
        .and_then(|arg| match unwrap_ts_expr(&arg.expr) {
            Expr::Object(obj) if arg.spread.is_none() => Some(obj),
            _ => None,
        })
}

/// Name of the called function: `foo` for `foo()` and `ns.foo()`.
pub fn callee_name(call: &CallExpr) -> Option<&str> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    match unwrap_ts_expr(callee) {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(ident) => Some(ident.sym.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// Name bound by a simple `const name = ...` pattern.
pub fn binding_ident(pat: &Pat) -> Option<&str> {
    match pat {
        Pat::Ident(binding) => Some(binding.id.sym.as_str()),
        _ => None,
    }
}

/// Extract the full name from a JSX member expression (e.g., "Foo.Bar.Baz").
pub fn extract_jsx_member_name(member: &JSXMemberExpr) -> String {
    let object_name = match &member.obj {
        JSXObject::Ident(ident) => ident.sym.to_string(),
        JSXObject::JSXMemberExpr(nested) => extract_jsx_member_name(nested),
    };
    format!("{}.{}", object_name, member.prop.sym)
}

/// Tag name as written: `Route`, `Foo.Bar` or `svg:path`.
pub fn jsx_element_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        JSXElementName::JSXMemberExpr(member) => extract_jsx_member_name(member),
        JSXElementName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

pub fn jsx_attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}
