/// Router Module Index
///
/// Splits routing into the open service endpoints and the gated blog subtree.
/// The gate is applied as a layer on the blog router as a whole, so no blog
/// path can be added without passing through it.

/// Routes accessible to every client: health check and the root redirect.
pub mod public;

/// The `/blog` subtree. Wrapped by the gate middleware in `create_router`.
pub mod blog;
