//! Error types surfaced by the title bar core.
//!
//! Lookup failures are returned to the caller. Host refusals (`HostError`)
//! come from host implementations; the core logs them and carries on.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TitleBarError {
    #[error("no title bar item registered under key `{0}`")]
    KeyNotFound(String),
    #[error("title bar item `{0}` is not a signal strength item")]
    NotSignalItem(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("host declined the request: {0}")]
    Declined(&'static str),
    #[error("operation not supported by this host")]
    Unsupported,
}

#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("invalid svg glyph: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("glyph target has no area")]
    EmptyTarget,
}

pub type Result<T, E = TitleBarError> = std::result::Result<T, E>;
