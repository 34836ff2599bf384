//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod sidebar;
pub(crate) mod transform;

pub(crate) use build::BuildArgs;
pub(crate) use sidebar::SidebarArgs;
pub(crate) use transform::TransformArgs;
