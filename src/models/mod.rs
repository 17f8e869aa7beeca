pub mod identity;
pub mod image_buffer;
pub mod validation;

pub use identity::{ParsedIdentityRecord, UserSuppliedRecord};
pub use image_buffer::{ChannelLayout, ImageBuffer};
pub use validation::{Field, ValidationResult};
