use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};

use crate::config::{Config, ImportStyle};
use crate::imports::{ComponentBinding, Extraction};
use crate::nodes::*;

// -----------------------------------------------------------------------------
// Wrapper factory import
// -----------------------------------------------------------------------------

/// The statement that brings the wrapper factory into scope.
///
/// `const { injectAsyncComponent } = require("…");` or, with
/// [`ImportStyle::Esm`], `import { injectAsyncComponent } from "…";`
///
/// `unresolved` is the context free globals such as `require` live in.
pub fn factory_import(config: &Config, unresolved: SyntaxContext) -> ModuleItem {
    match config.import_style {
        ImportStyle::Require => ModuleItem::Stmt(const_decl(
            destructure_pat(key_ident(&config.factory_name), ident(&config.factory_name)),
            call(
                global_expr("require", unresolved),
                vec![str_expr(&config.runtime_module)],
            ),
        )),
        ImportStyle::Esm => ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
            span: DUMMY_SP,
            specifiers: vec![ImportSpecifier::Named(ImportNamedSpecifier {
                span: DUMMY_SP,
                local: ident(&config.factory_name),
                imported: None,
                is_type_only: false,
            })],
            src: Box::new(str_lit(&config.runtime_module)),
            type_only: false,
            with: None,
            phase: ImportPhase::Evaluation,
        })),
    }
}

/// Prepend the factory import at the very top of the module body.
pub fn insert_factory_import(module: &mut Module, config: &Config, unresolved: SyntaxContext) {
    module.body.insert(0, factory_import(config, unresolved));
}

// -----------------------------------------------------------------------------
// Wrapper decorator
// -----------------------------------------------------------------------------

/// `const Foo = require(source).default;` or `const { Foo } = require(source).default;`
///
/// `require` here is the loader's own parameter, not the global.
fn extraction_stmt(binding: &ComponentBinding) -> Stmt {
    let local = ident_like(&binding.local);
    let pat = match &binding.extraction {
        Extraction::Default => binding_pat(local),
        Extraction::Named(exported) => destructure_pat(export_key(exported), local),
    };
    let required = member(
        call(ident_expr("require"), vec![str_expr(&binding.source)]),
        "default",
    );
    const_decl(pat, required)
}

/// Builds
///
/// ```js
/// injectAsyncComponent("Foo", <fallback>, (onReady) => {
///   require.ensure("../Foo", (require) => {
///     const Foo = require("../Foo").default;
///     onReady(Foo);
///   });
/// })
/// ```
pub fn wrapper_expr(
    binding: &ComponentBinding,
    fallback: &Expr,
    config: &Config,
    unresolved: SyntaxContext,
) -> Expr {
    let loader = arrow(
        "require",
        vec![
            extraction_stmt(binding),
            expr_stmt(call(
                ident_expr("onReady"),
                vec![Expr::Ident(ident_like(&binding.local))],
            )),
        ],
    );
    let ensure = call(
        member(global_expr("require", unresolved), "ensure"),
        vec![str_expr(&binding.source), loader],
    );

    call(
        ident_expr(&config.factory_name),
        vec![
            str_expr(&binding.local.sym),
            fallback.clone(),
            arrow("onReady", vec![expr_stmt(ensure)]),
        ],
    )
}

pub fn wrapper_decorator(
    binding: &ComponentBinding,
    fallback: &Expr,
    config: &Config,
    unresolved: SyntaxContext,
) -> Decorator {
    Decorator {
        span: DUMMY_SP,
        expr: Box::new(wrapper_expr(binding, fallback, config, unresolved)),
    }
}

/// Append one wrapper decorator per binding, after whatever decorators the
/// class still carries.
pub fn apply(
    class: &mut Class,
    bindings: &[ComponentBinding],
    fallback: &Expr,
    config: &Config,
    unresolved: SyntaxContext,
) {
    class.decorators.extend(
        bindings
            .iter()
            .map(|binding| wrapper_decorator(binding, fallback, config, unresolved)),
    );
}
