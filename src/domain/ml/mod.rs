pub mod features;
pub mod split;

pub use features::{ReturnFeatures, as_rows, pct_returns};
pub use split::{DEFAULT_TRAIN_RATIO, Split, chronological_split, shuffled_split, split_index};
