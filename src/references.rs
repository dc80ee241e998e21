use std::collections::HashSet;

use swc_core::common::{util::take::Take, SyntaxContext, DUMMY_SP};
use swc_core::ecma::{
    ast::*,
    visit::{Visit, VisitWith},
};

use crate::nodes::{const_decl, destructure_pat, ident_like, key_ident, this_props};

// -----------------------------------------------------------------------------
// Reference collection (one per method)
// -----------------------------------------------------------------------------

/// Which annotated names one method body mentions. A name only counts when
/// its syntax context matches too, so local shadows are ignored.
struct MethodReferences<'a> {
    names: &'a [Ident],
    found: HashSet<Id>,
}

impl<'a> MethodReferences<'a> {
    fn new(names: &'a [Ident]) -> Self {
        Self {
            names,
            found: HashSet::new(),
        }
    }

    fn record(&mut self, id: &Ident) {
        if self.names.iter().any(|n| n.sym == id.sym && n.ctxt == id.ctxt) {
            self.found.insert(id.to_id());
        }
    }

    /// Referenced names in extraction order.
    fn into_ordered(self) -> Vec<Ident> {
        self.names
            .iter()
            .filter(|name| self.found.contains(&name.to_id()))
            .cloned()
            .collect()
    }
}

impl Visit for MethodReferences<'_> {
    fn visit_expr(&mut self, e: &Expr) {
        if let Expr::Ident(id) = e {
            self.record(id);
        }
        e.visit_children_with(self);
    }

    // `{ Foo }`
    fn visit_prop(&mut self, p: &Prop) {
        if let Prop::Shorthand(id) = p {
            self.record(id);
        }
        p.visit_children_with(self);
    }

    // `<Foo />`, `</Foo>`
    fn visit_jsx_element_name(&mut self, n: &JSXElementName) {
        if let JSXElementName::Ident(id) = n {
            self.record(id);
        }
        n.visit_children_with(self);
    }

    // `<Foo.Item />`
    fn visit_jsx_object(&mut self, o: &JSXObject) {
        if let JSXObject::Ident(id) = o {
            self.record(id);
        }
        o.visit_children_with(self);
    }
}

pub fn collect_references(body: &BlockStmt, names: &[Ident]) -> Vec<Ident> {
    let mut refs = MethodReferences::new(names);
    body.visit_with(&mut refs);
    refs.into_ordered()
}

// -----------------------------------------------------------------------------
// Injection
// -----------------------------------------------------------------------------

/// `const { Foo } = this.props;`, declaring `Foo` in the context of `name`.
pub fn props_binding(name: &Ident) -> Stmt {
    const_decl(destructure_pat(key_ident(&name.sym), ident_like(name)), this_props())
}

fn is_super_call(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::Expr(ExprStmt { expr, .. })
            if matches!(&**expr, Expr::Call(CallExpr { callee: Callee::Super(_), .. }))
    )
}

fn splice_bindings(body: &mut BlockStmt, index: usize, referenced: &[Ident]) -> usize {
    body.stmts
        .splice(index..index, referenced.iter().map(props_binding));
    referenced.len()
}

fn inject_at(body: &mut BlockStmt, index: usize, names: &[Ident]) -> usize {
    let referenced = collect_references(body, names);
    splice_bindings(body, index, &referenced)
}

/// `() => <Foo />` becomes `() => { const { Foo } = this.props; return <Foo />; }`.
fn inject_into_arrow(arrow: &mut ArrowExpr, names: &[Ident]) -> usize {
    let mut refs = MethodReferences::new(names);
    arrow.body.visit_with(&mut refs);
    let referenced = refs.into_ordered();
    if referenced.is_empty() {
        return 0;
    }

    let returned = match &mut *arrow.body {
        BlockStmtOrExpr::Expr(expr) => Some(expr.take()),
        BlockStmtOrExpr::BlockStmt(_) => None,
    };
    if let Some(arg) = returned {
        *arrow.body = BlockStmtOrExpr::BlockStmt(BlockStmt {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            stmts: vec![Stmt::Return(ReturnStmt {
                span: DUMMY_SP,
                arg: Some(arg),
            })],
        });
    }

    match &mut *arrow.body {
        BlockStmtOrExpr::BlockStmt(body) => splice_bindings(body, 0, &referenced),
        BlockStmtOrExpr::Expr(_) => 0,
    }
}

/// Class property initializers that act as methods: arrows and function
/// expressions.
fn inject_into_initializer(value: &mut Expr, names: &[Ident]) -> usize {
    match value {
        Expr::Paren(paren) => inject_into_initializer(&mut paren.expr, names),
        Expr::Arrow(arrow) => inject_into_arrow(arrow, names),
        Expr::Fn(FnExpr { function, .. }) => match &mut function.body {
            Some(body) => inject_at(body, 0, names),
            None => 0,
        },
        _ => 0,
    }
}

fn key_name(key: &PropName) -> String {
    match key {
        PropName::Ident(id) => id.sym.to_string(),
        PropName::Str(s) => s.value.to_string(),
        _ => "<computed>".to_string(),
    }
}

/// Give every instance method that mentions an annotated name one
/// `const { Name } = this.props;` per name, ahead of its original statements.
/// Constructors get theirs right after `super(...)`. Instance properties
/// initialized with an arrow or function are treated as methods.
pub fn inject_references(class: &mut Class, names: &[Ident]) {
    if names.is_empty() {
        return;
    }
    for member in &mut class.body {
        let (label, injected) = match member {
            ClassMember::Method(method) if !method.is_static => match &mut method.function.body {
                Some(body) => (key_name(&method.key), inject_at(body, 0, names)),
                None => continue,
            },
            ClassMember::PrivateMethod(method) if !method.is_static => {
                match &mut method.function.body {
                    Some(body) => (format!("#{}", method.key.name), inject_at(body, 0, names)),
                    None => continue,
                }
            }
            ClassMember::Constructor(ctor) => match &mut ctor.body {
                Some(body) => {
                    let index = body
                        .stmts
                        .iter()
                        .position(is_super_call)
                        .map(|i| i + 1)
                        .unwrap_or(0);
                    ("constructor".to_string(), inject_at(body, index, names))
                }
                None => continue,
            },
            ClassMember::ClassProp(prop) if !prop.is_static => match &mut prop.value {
                Some(value) => (key_name(&prop.key), inject_into_initializer(value, names)),
                None => continue,
            },
            ClassMember::PrivateProp(prop) if !prop.is_static => match &mut prop.value {
                Some(value) => (
                    format!("#{}", prop.key.name),
                    inject_into_initializer(value, names),
                ),
                None => continue,
            },
            _ => continue,
        };
        if injected > 0 {
            tracing::trace!(method = %label, injected, "injected props bindings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_core::atoms::Atom;

    use crate::test_utils::{first_class_mut, parse_module, print_module};

    fn names(list: &[&str]) -> Vec<Ident> {
        list.iter().map(|n| Ident::from(Atom::from(*n))).collect()
    }

    fn rewrite(source: &str, list: &[&str]) -> String {
        let mut module = parse_module(source);
        inject_references(first_class_mut(&mut module), &names(list));
        print_module(&module)
    }

    fn same(source: &str) -> String {
        print_module(&parse_module(source))
    }

    #[test]
    fn jsx_and_identifier_references_are_found_once() {
        let module = parse_module(
            "class A { render() {
                return <div>
                    {this.props.a && <Foo color=\"red\" />}
                    {this.props.b && <Foo.Item />}
                    {React.createElement(Bar, { Baz })}
                </div>;
            } }",
        );
        let ModuleItem::Stmt(Stmt::Decl(Decl::Class(class))) = &module.body[0] else {
            panic!("expected a class");
        };
        let ClassMember::Method(render) = &class.class.body[0] else {
            panic!("expected render");
        };
        let body = render.function.body.as_ref().unwrap();
        let found = collect_references(body, &names(&["Bar", "Baz", "Foo", "Unused"]));
        let found: Vec<&str> = found.iter().map(|n| n.sym.as_ref()).collect();
        assert_eq!(found, ["Bar", "Baz", "Foo"]);
    }

    #[test]
    fn property_names_and_attributes_are_not_references() {
        let module = parse_module(
            "class A { render() { return <div Foo=\"x\">{this.props.Foo}{ { Foo: 1 } }</div>; } }",
        );
        let ModuleItem::Stmt(Stmt::Decl(Decl::Class(class))) = &module.body[0] else {
            panic!("expected a class");
        };
        let ClassMember::Method(render) = &class.class.body[0] else {
            panic!("expected render");
        };
        let body = render.function.body.as_ref().unwrap();
        assert!(collect_references(body, &names(&["Foo"])).is_empty());
    }

    #[test]
    fn repeated_references_inject_a_single_binding() {
        assert_eq!(
            rewrite(
                "class A { render() { return <div>{a && <Foo />}{b && <Foo />}</div>; } }",
                &["Foo"],
            ),
            same(
                "class A { render() { const { Foo } = this.props; \
                 return <div>{a && <Foo />}{b && <Foo />}</div>; } }"
            )
        );
    }

    #[test]
    fn helpers_get_bindings_and_unrelated_methods_do_not() {
        assert_eq!(
            rewrite(
                "class A {
                    renderHelper() { return <Foo color=\"red\" />; }
                    render() { return <div>{this.renderHelper()}</div>; }
                }",
                &["Foo"],
            ),
            same(
                "class A {
                    renderHelper() { const { Foo } = this.props; return <Foo color=\"red\" />; }
                    render() { return <div>{this.renderHelper()}</div>; }
                }"
            )
        );
    }

    #[test]
    fn nested_functions_and_conditionals_count() {
        assert_eq!(
            rewrite(
                "class A { items() { return this.props.list.map((x) => x ? Foo(x) : null); } }",
                &["Foo"],
            ),
            same(
                "class A { items() { const { Foo } = this.props; \
                 return this.props.list.map((x) => x ? Foo(x) : null); } }"
            )
        );
    }

    #[test]
    fn bindings_follow_extraction_order() {
        assert_eq!(
            rewrite("class A { render() { return [<Bar />, <Foo />]; } }", &["Foo", "Bar"]),
            same(
                "class A { render() { const { Foo } = this.props; const { Bar } = this.props; \
                 return [<Bar />, <Foo />]; } }"
            )
        );
    }

    #[test]
    fn constructor_bindings_follow_super() {
        assert_eq!(
            rewrite(
                "class A extends B { constructor(props) { super(props); this.el = <Foo />; } }",
                &["Foo"],
            ),
            same(
                "class A extends B { constructor(props) { super(props); \
                 const { Foo } = this.props; this.el = <Foo />; } }"
            )
        );
    }

    #[test]
    fn static_methods_are_skipped() {
        let source = "class A { static create() { return <Foo />; } }";
        assert_eq!(rewrite(source, &["Foo"]), same(source));
    }

    #[test]
    fn arrow_and_function_properties_are_treated_as_methods() {
        assert_eq!(
            rewrite(
                "class A {
                    renderHelper = () => <Foo />;
                    renderOther = function () { return <Foo />; };
                    #renderPrivate = () => { return <Foo />; };
                    label = 'Foo';
                    render() { return this.renderHelper(); }
                }",
                &["Foo"],
            ),
            same(
                "class A {
                    renderHelper = () => { const { Foo } = this.props; return <Foo />; };
                    renderOther = function () { const { Foo } = this.props; return <Foo />; };
                    #renderPrivate = () => { const { Foo } = this.props; return <Foo />; };
                    label = 'Foo';
                    render() { return this.renderHelper(); }
                }"
            )
        );
    }

    #[test]
    fn static_properties_and_unrelated_arrows_are_skipped() {
        let source = "class A { static Default = () => <Foo />; onClick = () => this.setState({}); }";
        assert_eq!(rewrite(source, &["Foo"]), same(source));
    }

    #[test]
    fn shadowed_names_are_not_references() {
        use swc_core::common::{Globals, Mark, GLOBALS};

        GLOBALS.set(&Globals::new(), || {
            let module = parse_module("class A { render() { return <Foo />; } }");
            let ModuleItem::Stmt(Stmt::Decl(Decl::Class(class))) = &module.body[0] else {
                panic!("expected a class");
            };
            let ClassMember::Method(render) = &class.class.body[0] else {
                panic!("expected render");
            };
            let body = render.function.body.as_ref().unwrap();
            let other = Ident::new(
                "Foo".into(),
                DUMMY_SP,
                SyntaxContext::empty().apply_mark(Mark::new()),
            );
            assert!(collect_references(body, &[other]).is_empty());
        });
    }
}
