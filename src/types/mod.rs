// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ARN confusion at compile time.

mod family_name;
mod id;
mod image_ref;
mod service_name;

pub use family_name::{FamilyName, FamilyNameError};
pub use id::{TaskArn, TaskDefinitionArn};
pub use image_ref::{ImageRef, ParseImageRefError};
pub use service_name::{ServiceName, ServiceNameError};
