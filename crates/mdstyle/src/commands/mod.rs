//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod preview;
mod style;

pub(crate) use convert::ConvertArgs;
pub(crate) use preview::PreviewArgs;
