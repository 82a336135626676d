// Server-held editing sessions: one document per session, mutated only
// through typed binder operations, previewed and saved from snapshots.

pub mod binder;
pub mod handlers;
pub mod store;
pub mod validate;
