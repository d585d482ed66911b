//! Adapter-side bookkeeping: the content provider and the mapping between
//! raw list positions and content-row indices.

mod item_provider;
mod position_remapper;

pub use item_provider::SwipeItemProvider;
pub use position_remapper::{PositionRemapper, RowKind};
