use thiserror::Error;

/// Why a structured path could not be turned into a value or member reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("`{0}` does not resolve to a symbol")]
    UnresolvedSymbol(String),

    #[error("no overload of `{name}` takes {arity} argument(s)")]
    NoMatchingOverload { name: String, arity: usize },

    /// An argument that is neither a literal nor a plain member chain.
    #[error("unsupported argument `{0}`")]
    UnsupportedArgument(String),

    /// A token that cannot appear in a member chain (operators, statement keywords).
    #[error("unsupported token `{0}` in member chain")]
    UnsupportedToken(String),

    #[error("invalid literal `{0}`")]
    InvalidLiteral(String),

    #[error("argument groups nest deeper than {limit} levels")]
    TooDeep { limit: usize },
}
