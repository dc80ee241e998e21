use swc_core::atoms::Atom;
use swc_core::ecma::ast::*;

// -----------------------------------------------------------------------------
// Import correlation
// -----------------------------------------------------------------------------

/// How the component is pulled out of the lazily required module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// `import Foo from "…"` → `const Foo = require("…").default`
    Default,
    /// `import { Foo } from "…"` → `const { Foo } = require("…").default`.
    /// Holds the exported name, which differs from the local one for
    /// `import { Foo as Bar }` and may be a string (`import { "a-b" as Bar }`).
    Named(ModuleExportName),
}

/// Where one annotated component name comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBinding {
    /// The local binding the import introduced, syntax context included.
    pub local: Ident,
    pub source: String,
    pub extraction: Extraction,
}

impl ComponentBinding {
    pub fn is_default_binding(&self) -> bool {
        self.extraction == Extraction::Default
    }

    /// The exported name for named bindings.
    pub fn exported(&self) -> Option<&Atom> {
        match &self.extraction {
            Extraction::Default => None,
            Extraction::Named(name) => Some(export_sym(name)),
        }
    }

    fn binds(&self, local: &Ident) -> bool {
        self.local.to_id() == local.to_id()
    }
}

fn export_sym(name: &ModuleExportName) -> &Atom {
    match name {
        ModuleExportName::Ident(id) => &id.sym,
        ModuleExportName::Str(s) => &s.value,
    }
}

/// The local name a specifier binds and how to extract it, skipping the
/// shapes that can't be rewritten (namespace and type-only specifiers).
fn specifier_binding(specifier: &ImportSpecifier) -> Option<(&Ident, Extraction)> {
    match specifier {
        ImportSpecifier::Default(default) => Some((&default.local, Extraction::Default)),
        ImportSpecifier::Named(named) if !named.is_type_only => {
            let imported = named
                .imported
                .clone()
                .unwrap_or_else(|| ModuleExportName::Ident(named.local.clone()));
            let extraction = if export_sym(&imported).as_ref() == "default" {
                Extraction::Default
            } else {
                Extraction::Named(imported)
            };
            Some((&named.local, extraction))
        }
        _ => None,
    }
}

/// Snapshot of the module's top-level value imports, in source order.
pub fn module_imports(module: &Module) -> Vec<ImportDecl> {
    module
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) if !import.type_only => {
                Some(import.clone())
            }
            _ => None,
        })
        .collect()
}

/// One binding per annotated name that a top-level import introduces, in
/// import order and then specifier order. Names nothing imports are skipped.
///
/// Names match on symbol and syntax context, so a decorator argument only
/// resolves to the import it actually refers to.
pub fn correlate(imports: &[ImportDecl], names: &[Ident]) -> Vec<ComponentBinding> {
    let mut out: Vec<ComponentBinding> = vec![];
    for import in imports {
        for specifier in &import.specifiers {
            let Some((local, extraction)) = specifier_binding(specifier) else {
                continue;
            };
            let id = local.to_id();
            if !names.iter().any(|n| n.to_id() == id) || out.iter().any(|b| b.binds(local)) {
                continue;
            }
            out.push(ComponentBinding {
                local: local.clone(),
                source: import.src.value.to_string(),
                extraction,
            });
        }
    }
    tracing::debug!(
        bindings = ?out.iter().map(|b| b.local.sym.as_ref()).collect::<Vec<&str>>(),
        "correlated imports"
    );
    out
}

// -----------------------------------------------------------------------------
// Import rewriting
// -----------------------------------------------------------------------------

/// Drop every specifier that introduced one of `bindings`. A declaration left
/// without specifiers is removed instead of being printed as `import {} from`.
pub fn remove_bindings(module: &mut Module, bindings: &[ComponentBinding]) {
    if bindings.is_empty() {
        return;
    }

    let is_matched = |specifier: &ImportSpecifier| {
        specifier_binding(specifier)
            .map(|(local, _)| bindings.iter().any(|b| b.binds(local)))
            .unwrap_or(false)
    };

    module.body.retain_mut(|item| {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            return true;
        };
        if import.type_only || !import.specifiers.iter().any(|s| is_matched(s)) {
            return true;
        }

        import.specifiers.retain(|s| !is_matched(s));
        if import.specifiers.is_empty() {
            tracing::debug!(source = %import.src.value, "dropped import");
            false
        } else {
            tracing::debug!(source = %import.src.value, "narrowed import");
            true
        }
    });
}
