//! Configuration options for the resolver.

/// What a type variable resolves to when no inheritance edge leads from the
/// viewing type to the variable's declaring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Erase the variable to the top type.
    #[default]
    TopType,

    /// Report [`ResolveError::Unresolved`](crate::ResolveError::Unresolved).
    Error,
}

/// Configuration options for type resolution.
///
/// # Example
///
/// ```
/// use generis_core::{Fallback, ResolveOptions};
///
/// let options = ResolveOptions {
///     fallback: Fallback::Error,
///     translate_inherited: true,
/// };
/// assert_ne!(options, ResolveOptions::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Behaviour when a variable cannot be reached from the viewing type.
    ///
    /// Default: `Fallback::TopType`
    pub fallback: Fallback,

    /// Re-express inherited supertypes in terms of the viewing type before
    /// climbing through them.
    ///
    /// When off, an edge such as `Mid<T> extends Base<T>` is followed with
    /// its declared arguments, so a variable reached two levels up resolves
    /// to the intermediate type's own variable. When on, the edge is first
    /// resolved against the current viewing type, which yields the viewing
    /// type's actual argument instead.
    ///
    /// Default: false
    pub translate_inherited: bool,
}

impl ResolveOptions {
    /// Options that report unresolvable variables instead of erasing them.
    pub fn strict() -> Self {
        Self {
            fallback: Fallback::Error,
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_translate_inherited(mut self, translate: bool) -> Self {
        self.translate_inherited = translate;
        self
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            fallback: Fallback::TopType,
            translate_inherited: false,
        }
    }
}
