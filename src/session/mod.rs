/*!
 * Session resolution
 *
 * Responsibility:
 * - request headers → Option<Session> (identity provider に委譲)
 * - "no session" と "resolver failure" を区別して返す
 *
 * Public API:
 * - Session / SessionUser
 * - SessionResolver (trait), DbSessionResolver, ProviderSessionResolver
 */

pub mod database;
pub mod provider;
pub mod resolver;
mod types;

pub use database::DbSessionResolver;
pub use provider::ProviderSessionResolver;
pub use resolver::{ResolverError, SessionResolver, session_token};
pub use types::{Session, SessionUser};
