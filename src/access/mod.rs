/*
 * Responsibility
 * - route classification (public / protected / auth-only)
 * - allow / redirect decision, shared by the edge middleware and the page layout
 */
pub mod gate;
pub mod route;

pub use gate::{AccessGate, Decision};
pub use route::{AUTH_ENTRY, MatchPolicy, PROTECTED_HOME, RouteClass, RouteTable};
