mod pinned;

pub use pinned::{encode_snapshot, PinnedEntry};
