/// Infallible conversion from an unresolved configuration table to its resolved form.
pub(crate) trait Resolve {
    type Resolved;

    fn resolve(self) -> Self::Resolved;
}

/// Fallible conversion from an unresolved configuration table to its resolved form.
pub(crate) trait TryResolve {
    type Resolved;
    type Error;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error>;
}

/// Like [`TryResolve`], but with some outside context available during resolution.
pub(crate) trait TryResolveWithContext {
    type Resolved;
    type Context;
    type Error;

    fn try_resolve_with_context(self, context: Self::Context)
        -> Result<Self::Resolved, Self::Error>;
}
