//! Canonical JSON: UTF-8, object keys sorted bytewise, compact separators,
//! no trailing newline. Every digest in this workspace is taken over these
//! bytes, so the writer here must stay byte-stable across releases.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

use camino::Utf8Path;
use serde::Serialize;
use serde_json::Value;

use crate::{IoError, IoResult};

/// Serialize a JSON value to canonical bytes.
pub fn to_canonical_bytes(value: &Value) -> IoResult<Vec<u8>> {
    let mut out = Vec::with_capacity(256);
    write_value(&mut out, value)?;
    Ok(out)
}

/// Canonical bytes of any serializable model, via an intermediate `Value`.
pub fn canonical_bytes_of<T: Serialize>(model: &T) -> IoResult<Vec<u8>> {
    let value = serde_json::to_value(model)?;
    to_canonical_bytes(&value)
}

fn write_value(out: &mut Vec<u8>, value: &Value) -> IoResult<()> {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => {
            let rendered = serde_json::to_vec(n)?;
            out.extend_from_slice(&rendered);
        }
        Value::String(s) => write_escaped(out, s)?,
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            // Sort keys bytewise; serde_json map order is insertion order.
            let sorted: BTreeMap<&str, &Value> =
                map.iter().map(|(k, v)| (k.as_str(), v)).collect();
            out.push(b'{');
            for (i, (key, item)) in sorted.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_escaped(out, key)?;
                out.push(b':');
                write_value(out, item)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn write_escaped(out: &mut Vec<u8>, s: &str) -> IoResult<()> {
    let rendered = serde_json::to_vec(&Value::String(s.to_string()))?;
    out.extend_from_slice(&rendered);
    Ok(())
}

/// Atomically write canonical bytes to `path`: temp file in the same
/// directory, fsync, rename. Falls back to copy+remove when rename crosses
/// a filesystem boundary.
pub fn write_canonical_file(path: &Utf8Path, value: &Value) -> IoResult<()> {
    let bytes = to_canonical_bytes(value)?;

    let dir = path
        .parent()
        .ok_or_else(|| IoError::Path(format!("no parent directory for {path}")))?;
    let tmp = dir.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or("canonical.json")
    ));

    {
        let mut f = fs::File::create(tmp.as_std_path())?;
        f.write_all(&bytes)?;
        f.sync_all()?;
    }

    match fs::rename(tmp.as_std_path(), path.as_std_path()) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(tmp.as_std_path(), path.as_std_path())?;
            fs::remove_file(tmp.as_std_path())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_sorted_and_compact() {
        let v = json!({"b": 1, "a": {"z": true, "m": null}, "c": [1, 2]});
        let bytes = to_canonical_bytes(&v).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a":{"m":null,"z":true},"b":1,"c":[1,2]}"#
        );
    }

    #[test]
    fn strings_escaped_like_serde() {
        let v = json!({"note": "a\"b\\c\n"});
        let bytes = to_canonical_bytes(&v).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"note":"a\"b\\c\n"}"#
        );
    }

    #[test]
    fn no_trailing_newline() {
        let bytes = to_canonical_bytes(&json!({"k": 1})).unwrap();
        assert_ne!(*bytes.last().unwrap(), b'\n');
    }

    #[test]
    fn atomic_write_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("out.json")).unwrap();

        let v = json!({"beta": 2, "alpha": 1});
        write_canonical_file(&path, &v).unwrap();

        let bytes = fs::read(path.as_std_path()).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"alpha":1,"beta":2}"#);
    }
}
