use serde::Serialize;
use std::path::PathBuf;
use umami_graph::{DetectorKind, KeyStrategy, Strategy};

/// Values given on the command line.
///
/// Only fields that were actually passed are serialized, so merging this
/// over the other layers leaves unset fields untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_size: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<DetectorKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<KeyStrategy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_rebuild: Option<bool>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
