use serde::Deserialize;

pub const DEFAULT_RUNTIME_MODULE: &str = "react-async-component-tools/lib/AsyncComponentContainer";
pub const LEGACY_RUNTIME_MODULE: &str = "babel-plugin-async-component/lib/AsyncComponentContainer";
pub const DEFAULT_FACTORY_NAME: &str = "injectAsyncComponent";

pub const COMPONENT_DECORATOR: &str = "asyncComponent";
pub const FALLBACK_DECORATOR: &str = "asyncLoadingElement";

/// How the wrapper factory is brought into scope at the top of the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStyle {
    /// `const { injectAsyncComponent } = require("…");`
    #[default]
    Require,
    /// `import { injectAsyncComponent } from "…";`
    Esm,
}

/// Which expressions are accepted as the `@asyncLoadingElement` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `<div>loading...</div>`
    #[default]
    Jsx,
    /// `React.createElement("div", null, "loading...")`
    Call,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub runtime_module: String,
    pub factory_name: String,
    pub import_style: ImportStyle,
    pub dialect: Dialect,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
            factory_name: DEFAULT_FACTORY_NAME.to_string(),
            import_style: ImportStyle::default(),
            dialect: Dialect::default(),
        }
    }
}

impl Config {
    /// Parse the plugin's JSON config. An empty string means "use the defaults".
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    pub fn legacy() -> Self {
        Self {
            runtime_module: LEGACY_RUNTIME_MODULE.to_string(),
            ..Self::default()
        }
    }
}
