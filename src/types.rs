//! Core types shared by the catalog, its stores and adapters.

/// AgentId: identifier of an agent record, always carried as its decimal string form
///
/// File-backed deployments assign these sequentially; sled-backed deployments render the
/// store-issued `u64`. The two are never mixed within one store.
pub type AgentId = String;

/// SledKey: big-endian encoding of a store-issued id, so key order is id order
pub type SledKey = [u8; 8];
