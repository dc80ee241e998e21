//! Small constructors for the nodes the transform synthesizes.
//!
//! Everything is built on `DUMMY_SP`. Fresh names get an empty syntax
//! context; names that must line up with user code carry its context.

use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::{ast::*, utils::ExprFactory},
};

pub fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

pub fn ident_expr(name: &str) -> Expr {
    Expr::Ident(ident(name))
}

/// `name` with the context of `like`, spanless.
pub fn ident_like(like: &Ident) -> Ident {
    Ident::new(like.sym.clone(), DUMMY_SP, like.ctxt)
}

/// A free reference such as `require` that must stay global.
pub fn global_expr(name: &str, unresolved: SyntaxContext) -> Expr {
    Expr::Ident(Ident::new(name.into(), DUMMY_SP, unresolved))
}

pub fn str_lit(value: &str) -> Str {
    Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }
}

pub fn str_expr(value: &str) -> Expr {
    Expr::Lit(Lit::Str(str_lit(value)))
}

pub fn member(obj: Expr, prop: &str) -> Expr {
    Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(obj),
        prop: MemberProp::Ident(IdentName::new(prop.into(), DUMMY_SP)),
    })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        span: DUMMY_SP,
        callee: callee.as_callee(),
        args: args.into_iter().map(|a| a.as_arg()).collect(),
        type_args: None,
        ctxt: SyntaxContext::empty(),
    })
}

/// `(param) => { ...stmts }`
pub fn arrow(param: &str, stmts: Vec<Stmt>) -> Expr {
    Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: vec![Pat::Ident(ident(param).into())],
        body: Box::new(BlockStmtOrExpr::BlockStmt(BlockStmt {
            span: DUMMY_SP,
            stmts,
            ctxt: SyntaxContext::empty(),
        })),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    })
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(expr),
    })
}

/// `const <name> = <init>;`
pub fn const_decl(name: Pat, init: Expr) -> Stmt {
    Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span: DUMMY_SP,
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name,
            init: Some(Box::new(init)),
            definite: false,
        }],
        ctxt: SyntaxContext::empty(),
    })))
}

pub fn binding_pat(local: Ident) -> Pat {
    Pat::Ident(local.into())
}

pub fn key_ident(name: &str) -> PropName {
    PropName::Ident(IdentName::new(name.into(), DUMMY_SP))
}

/// Object key for an exported name. `"lazy-foo"` stays a string key.
pub fn export_key(name: &ModuleExportName) -> PropName {
    match name {
        ModuleExportName::Ident(id) => key_ident(&id.sym),
        ModuleExportName::Str(s) => PropName::Str(str_lit(&s.value)),
    }
}

/// `{ local }`, or `{ key: local }` when the two differ.
pub fn destructure_pat(key: PropName, local: Ident) -> Pat {
    let shorthand = matches!(&key, PropName::Ident(k) if k.sym == local.sym);
    let prop = if shorthand {
        ObjectPatProp::Assign(AssignPatProp {
            span: DUMMY_SP,
            key: local.into(),
            value: None,
        })
    } else {
        ObjectPatProp::KeyValue(KeyValuePatProp {
            key,
            value: Box::new(binding_pat(local)),
        })
    };
    Pat::Object(ObjectPat {
        span: DUMMY_SP,
        props: vec![prop],
        optional: false,
        type_ann: None,
    })
}

pub fn this_props() -> Expr {
    member(Expr::This(ThisExpr { span: DUMMY_SP }), "props")
}
