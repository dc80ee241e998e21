//! Expands the ambient `@asyncComponent(Foo)` / `@asyncLoadingElement(<div />)`
//! decorators into explicit code-splitting code:
//!
//! ```js
//! import Foo from '../Foo'
//!
//! @asyncComponent(Foo)
//! @asyncLoadingElement(<div>loading...</div>)
//! export default class Example {
//!   render() { return <Foo /> }
//! }
//! ```
//!
//! becomes
//!
//! ```js
//! const { injectAsyncComponent } = require("react-async-component-tools/lib/AsyncComponentContainer");
//!
//! @injectAsyncComponent("Foo", <div>loading...</div>, (onReady) => {
//!   require.ensure("../Foo", (require) => {
//!     const Foo = require("../Foo").default;
//!     onReady(Foo);
//!   });
//! })
//! export default class Example {
//!   render() {
//!     const { Foo } = this.props;
//!     return <Foo />
//!   }
//! }
//! ```

use swc_core::{
    common::{errors::HANDLER, Mark, SyntaxContext},
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};

pub mod annotations;
pub mod config;
pub mod error;
pub mod imports;
mod nodes;
pub mod references;
pub mod wrapper;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod test_utils;

pub use config::{Config, Dialect, ImportStyle};
pub use error::TransformError;

use imports::ComponentBinding;

// -----------------------------------------------------------------------------
// Transform state (one module)
// -----------------------------------------------------------------------------

pub struct AsyncComponentTransform<'a> {
    config: &'a Config,
    // Context for free globals like `require`.
    unresolved: SyntaxContext,

    // Top-level imports as they were before any class was processed.
    imports: Vec<ImportDecl>,

    // Bindings whose static imports go away once the walk is over.
    removed: Vec<ComponentBinding>,
    needs_factory_import: bool,

    error: Option<TransformError>,
}

impl<'a> AsyncComponentTransform<'a> {
    pub fn new(config: &'a Config, module: &Module, unresolved: SyntaxContext) -> Self {
        Self {
            config,
            unresolved,
            imports: imports::module_imports(module),
            removed: vec![],
            needs_factory_import: false,
            error: None,
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(decorators = class.decorators.len()))]
    fn process_class(&mut self, class: &mut Class) -> Result<(), TransformError> {
        let Some(annotations) = annotations::extract(class, self.config.dialect)? else {
            return Ok(());
        };
        self.needs_factory_import = true;

        let bindings = imports::correlate(&self.imports, &annotations.names);
        wrapper::apply(
            class,
            &bindings,
            &annotations.fallback,
            self.config,
            self.unresolved,
        );
        references::inject_references(class, &annotations.names);

        for binding in bindings {
            if !self.removed.iter().any(|b| b.local.to_id() == binding.local.to_id()) {
                self.removed.push(binding);
            }
        }
        Ok(())
    }

    /// Rewrite the module's imports once every class has been visited.
    pub fn finish(self, module: &mut Module) -> Result<(), TransformError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        imports::remove_bindings(module, &self.removed);
        if self.needs_factory_import {
            wrapper::insert_factory_import(module, self.config, self.unresolved);
        }
        Ok(())
    }
}

impl VisitMut for AsyncComponentTransform<'_> {
    fn visit_mut_class(&mut self, class: &mut Class) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.process_class(class) {
            tracing::debug!(error = %err, "aborting module");
            self.error = Some(err);
            return;
        }
        class.visit_mut_children_with(self);
    }
}

// -----------------------------------------------------------------------------
// Library entrypoints
// -----------------------------------------------------------------------------

fn run(module: &mut Module, config: &Config, unresolved: SyntaxContext) -> Result<(), TransformError> {
    let mut working = module.clone();
    let mut transform = AsyncComponentTransform::new(config, &working, unresolved);
    working.visit_mut_with(&mut transform);
    transform.finish(&mut working)?;
    *module = working;
    Ok(())
}

/// Transform one ES module that hasn't been through the resolver. On error
/// the module is left exactly as it was.
pub fn transform_module(module: &mut Module, config: &Config) -> Result<(), TransformError> {
    run(module, config, SyntaxContext::empty())
}

/// Transform a module the resolver already ran on. Injected bindings keep
/// the syntax context of the names they stand in for, and globals such as
/// `require` are tagged with `unresolved_mark` so hygiene leaves them alone.
pub fn transform_resolved_module(
    module: &mut Module,
    config: &Config,
    unresolved_mark: Mark,
) -> Result<(), TransformError> {
    run(module, config, SyntaxContext::empty().apply_mark(unresolved_mark))
}

/// Scripts have no imports to split, so only modules are transformed.
pub fn transform_program(
    program: &mut Program,
    config: &Config,
    unresolved_mark: Option<Mark>,
) -> Result<(), TransformError> {
    match program {
        Program::Module(module) => match unresolved_mark {
            Some(mark) => transform_resolved_module(module, config, mark),
            None => transform_module(module, config),
        },
        Program::Script(_) => {
            tracing::trace!("skipping script");
            Ok(())
        }
    }
}

// -----------------------------------------------------------------------------
// Plugin entrypoint
// -----------------------------------------------------------------------------

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let config = match metadata.get_transform_plugin_config() {
        Some(raw) => Config::from_json(&raw).unwrap_or_else(|err| {
            HANDLER.with(|handler| {
                handler.warn(&format!(
                    "invalid async component plugin config, using defaults: {err}"
                ))
            });
            Config::default()
        }),
        None => Config::default(),
    };

    if let Err(err) = transform_program(&mut program, &config, Some(metadata.unresolved_mark)) {
        HANDLER.with(|handler| {
            handler
                .struct_span_err(err.span(), &err.to_string())
                .emit()
        });
    }

    program
}
