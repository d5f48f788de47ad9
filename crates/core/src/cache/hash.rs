//! Storage keys for cached image data.

use sha2::{Digest, Sha256};
use url::Url;

/// SHA-256 hex of the serialized URL. Equal URLs after parsing share a key.
pub fn image_data_key(url: &Url) -> String {
    hex::encode(Sha256::digest(url.as_str().as_bytes()))
}
