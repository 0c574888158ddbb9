/// Fixed-capacity bitset of admissible tile indices
pub mod bitset;
/// Deadend records and the sentinel repair tile
pub mod deadend;
/// Step state machine driving propagation and collapse
pub mod executor;
/// Side sets, neighbor restriction and cell processing
pub mod propagation;
/// Minimum-entropy cell selection
pub mod selection;
