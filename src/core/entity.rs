//! Entity trait defining the storage-facing abstraction for persisted records

use uuid::Uuid;

/// Base trait for every record the storage backends can hold.
///
/// Backends key records by [`id`](Entity::id) and name their collection after
/// [`resource_name`](Entity::resource_name).
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name, used for URLs and collection names (e.g., "appointments")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "appointment")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;
}
