use swc_core::ecma::ast::*;

use crate::config::{Dialect, COMPONENT_DECORATOR, FALLBACK_DECORATOR};
use crate::error::{Result, TransformError};

// -----------------------------------------------------------------------------
// Ambient decorators
// -----------------------------------------------------------------------------

/// A validated `@asyncComponent(Foo)` or `@asyncLoadingElement(<div />)`.
#[derive(Debug, Clone)]
pub enum AnnotationKind {
    Component(Ident),
    Fallback(Box<Expr>),
}

/// Everything the ambient decorators of one class asked for.
#[derive(Debug, Clone)]
pub struct ClassAnnotations {
    /// Component names in decorator order, without duplicates. Each keeps the
    /// syntax context the resolver gave the decorator argument.
    pub names: Vec<Ident>,
    pub fallback: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Component,
    Fallback,
}

fn callee_of(decorator: &Decorator) -> &Expr {
    match &*decorator.expr {
        Expr::Call(CallExpr {
            callee: Callee::Expr(callee),
            ..
        }) => &**callee,
        other => other,
    }
}

fn role_of(decorator: &Decorator) -> Option<Role> {
    match callee_of(decorator) {
        Expr::Ident(id) if id.sym.as_ref() == COMPONENT_DECORATOR => Some(Role::Component),
        Expr::Ident(id) if id.sym.as_ref() == FALLBACK_DECORATOR => Some(Role::Fallback),
        _ => None,
    }
}

/// `@asyncComponent` without parentheses has no arguments at all.
fn arguments_of(decorator: &Decorator) -> &[ExprOrSpread] {
    match &*decorator.expr {
        Expr::Call(call) => call.args.as_slice(),
        _ => &[],
    }
}

fn single_argument(decorator: &Decorator) -> Option<&Expr> {
    match arguments_of(decorator) {
        [ExprOrSpread { spread: None, expr }] => Some(unwrap_parens(expr)),
        _ => None,
    }
}

fn unwrap_parens(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

fn is_view_element(expr: &Expr, dialect: Dialect) -> bool {
    match dialect {
        Dialect::Jsx => matches!(expr, Expr::JSXElement(_) | Expr::JSXFragment(_)),
        Dialect::Call => matches!(expr, Expr::Call(_)),
    }
}

fn classify(decorator: &Decorator, role: Role, dialect: Dialect) -> Result<AnnotationKind> {
    let argument = single_argument(decorator);
    match role {
        Role::Fallback => match argument {
            Some(element) if is_view_element(element, dialect) => {
                Ok(AnnotationKind::Fallback(Box::new(element.clone())))
            }
            _ => Err(TransformError::InvalidFallbackArgument {
                span: decorator.span,
                dialect,
            }),
        },
        Role::Component => match argument {
            Some(Expr::Ident(id)) => Ok(AnnotationKind::Component(id.clone())),
            _ => Err(TransformError::InvalidComponentArgument {
                span: decorator.span,
            }),
        },
    }
}

/// Pull the ambient decorators off `class`.
///
/// Returns `Ok(None)` and leaves the class alone when it carries neither kind.
/// On success the ambient decorators are gone and every other decorator keeps
/// its position.
pub fn extract(class: &mut Class, dialect: Dialect) -> Result<Option<ClassAnnotations>> {
    let roles: Vec<Option<Role>> = class.decorators.iter().map(role_of).collect();
    let components = roles.iter().filter(|r| **r == Some(Role::Component)).count();
    let fallbacks = roles.iter().filter(|r| **r == Some(Role::Fallback)).count();

    if components == 0 && fallbacks == 0 {
        return Ok(None);
    }

    if components == 0 || fallbacks != 1 {
        let span = class
            .decorators
            .iter()
            .zip(&roles)
            .find_map(|(d, r)| r.map(|_| d.span))
            .unwrap_or(class.span);
        return Err(TransformError::MisconfiguredAnnotation { span });
    }

    // The loading element is checked before any component argument.
    let mut fallback = None;
    for (decorator, role) in class.decorators.iter().zip(&roles) {
        if *role == Some(Role::Fallback) {
            if let AnnotationKind::Fallback(element) = classify(decorator, Role::Fallback, dialect)? {
                fallback = Some(element);
            }
        }
    }

    let mut names: Vec<Ident> = Vec::with_capacity(components);
    for (decorator, role) in class.decorators.iter().zip(&roles) {
        if *role == Some(Role::Component) {
            if let AnnotationKind::Component(name) = classify(decorator, Role::Component, dialect)? {
                if !names.iter().any(|n| n.to_id() == name.to_id()) {
                    names.push(name);
                }
            }
        }
    }

    let Some(fallback) = fallback else {
        return Err(TransformError::MisconfiguredAnnotation { span: class.span });
    };

    class.decorators.retain(|d| role_of(d).is_none());

    tracing::debug!(
        names = ?names.iter().map(|n| n.sym.as_ref()).collect::<Vec<&str>>(),
        "extracted ambient decorators"
    );
    Ok(Some(ClassAnnotations { names, fallback }))
}
