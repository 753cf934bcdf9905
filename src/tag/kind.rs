//! Tag kind definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ProtoTag;

/// Kind of rendered asset reference.
///
/// Selects both the transform applied to the sources and the tag shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// `<link href=".." rel="stylesheet">`
    #[serde(alias = "css")]
    Stylesheet,
    /// `<script src=".."></script>`
    #[serde(alias = "js")]
    Script,
}

impl TagKind {
    /// Base tag shape for this kind, before descriptor attributes are added.
    pub fn proto(self) -> ProtoTag {
        match self {
            Self::Stylesheet => ProtoTag::new("link", "href").attr("rel", Some("stylesheet")),
            Self::Script => ProtoTag::new("script", "src").closing(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stylesheet => "stylesheet",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stylesheet" | "css" => Ok(Self::Stylesheet),
            "script" | "js" => Ok(Self::Script),
            other => Err(format!("unknown tag kind `{other}`")),
        }
    }
}
