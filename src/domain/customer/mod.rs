pub mod features;
pub mod record;

pub use features::{CustomerFeatures, FeatureField};
pub use record::CustomerRecord;
