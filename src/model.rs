pub use agrigenome_core::{Crop, CropState, Genetics, MutationEngine};
pub mod config {
    pub use agrigenome_core::config::*;
}
pub mod crop {
    pub use agrigenome_core::crop::*;
}
pub mod engine {
    pub use agrigenome_core::engine::*;
}
pub mod error {
    pub use agrigenome_core::error::*;
}
pub mod field {
    pub use agrigenome_core::field::*;
}
pub mod genetics {
    pub use agrigenome_core::genetics::*;
}
pub mod metrics {
    pub use agrigenome_core::metrics::*;
}
pub mod plant {
    pub use agrigenome_core::plant::*;
}
pub mod registry {
    pub use agrigenome_core::registry::*;
}
pub mod data {
    pub use agrigenome_data::*;
}
