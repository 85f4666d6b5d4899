//! Entity trait: records the backend identifies by a stable id.

/// Something the backend identifies (catalog products, recorded sales).
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
