use std::io;

use thiserror::Error;

use crate::api::types::GameObjectId;
use crate::assets::registry::AssetHandle;

/// Errors raised by scene persistence and asset bookkeeping.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown component type `{0}`")]
    UnknownComponent(String),
    #[error("no game object with id {0:?}")]
    MissingGameObject(GameObjectId),
    #[error("no asset {0}")]
    MissingAsset(AssetHandle),
    #[error("asset {0} leaves no room for another id")]
    AssetIdOutOfRange(AssetHandle),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(String),
    #[error("game object id {0:?} leaves no room for another id")]
    IdOutOfRange(GameObjectId),
}

pub type Result<T> = std::result::Result<T, Error>;
