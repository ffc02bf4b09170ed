//! SHA-256 digests over canonical bytes, and the typed artifact IDs built
//! from them (`CASE:`, `RES:`, `RUN:`).

use serde::Serialize;
use sha2::{Digest, Sha256};

use mirath_core::ids::{is_ts_utc_z, CaseId, ResultId, RunId};

use crate::canonical_json::canonical_bytes_of;
use crate::{IoError, IoResult};

/// Lowercase hex SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Lowercase hex SHA-256 of a model's canonical JSON bytes.
pub fn sha256_canonical<T: Serialize>(model: &T) -> IoResult<String> {
    let bytes = canonical_bytes_of(model)?;
    Ok(sha256_hex(&bytes))
}

/// `CASE:<hex64>` from the raw bytes of a case file as read from disk.
pub fn case_id_from_bytes(bytes: &[u8]) -> IoResult<CaseId> {
    let hex = sha256_hex(bytes);
    let token = format!("CASE:{hex}");
    token
        .parse::<CaseId>()
        .map_err(|e| IoError::Hash(e.to_string()))
}

/// `RES:<hex64>` over the canonical bytes of a result document
/// serialized without its own `id` field.
pub fn res_id_from_canonical<T: Serialize>(model: &T) -> IoResult<ResultId> {
    let hex = sha256_canonical(model)?;
    let token = format!("RES:{hex}");
    token
        .parse::<ResultId>()
        .map_err(|e| IoError::Hash(e.to_string()))
}

/// `RUN:<ts>-<hex64>` over the canonical bytes of a run record serialized
/// without its own `id` field. `ts` must be a UTC `YYYY-MM-DDTHH:MM:SSZ`
/// timestamp, which then participates in the token but not the digest.
pub fn run_id_from_canonical<T: Serialize>(ts: &str, model: &T) -> IoResult<RunId> {
    if !is_ts_utc_z(ts) {
        return Err(IoError::Invalid(format!("run timestamp not UTC Z-form: {ts}")));
    }
    let hex = sha256_canonical(model)?;
    let token = format!("RUN:{ts}-{hex}");
    token
        .parse::<RunId>()
        .map_err(|e| IoError::Hash(e.to_string()))
}
