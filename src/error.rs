use swc_core::common::Span;
use thiserror::Error;

use crate::config::Dialect;

/// Static misuse of the `@asyncComponent` / `@asyncLoadingElement` contract.
///
/// Every variant aborts the transform of the whole module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error(
        "One `@asyncLoadingElement` decorator is needed when a class is decorated with one or \
         more `@asyncComponent` decorators and vice-versa."
    )]
    MisconfiguredAnnotation { span: Span },

    #[error(
        "`@asyncLoadingElement` decorator requires a single argument which must be {}",
        expected_fallback(.dialect)
    )]
    InvalidFallbackArgument { span: Span, dialect: Dialect },

    #[error(
        "`@asyncComponent` decorator requires a single argument which must be an identifier"
    )]
    InvalidComponentArgument { span: Span },
}

impl TransformError {
    pub fn span(&self) -> Span {
        match self {
            TransformError::MisconfiguredAnnotation { span }
            | TransformError::InvalidFallbackArgument { span, .. }
            | TransformError::InvalidComponentArgument { span } => *span,
        }
    }
}

fn expected_fallback(dialect: &Dialect) -> &'static str {
    match dialect {
        Dialect::Jsx => "a JSX tag",
        Dialect::Call => "a call expression",
    }
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;
