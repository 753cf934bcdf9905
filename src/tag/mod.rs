//! Markup descriptors and tag rendering.

mod descriptor;
mod kind;
mod proto;

pub use descriptor::{Descriptor, DescriptorBuilder};
pub use kind::TagKind;
pub use proto::ProtoTag;
