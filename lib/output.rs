//! Writing computed data to disk for external plotting.
//!
//! Arrays serialize through `ndarray`'s `serde` support as objects of the form
//! `{"v": 1, "dim": [...], "data": [...]}`, with data in row-major order.

use std::{
    fs,
    io::{ BufWriter, Write },
    path::Path,
};
use serde::Serialize;
use tracing::info;
use crate::error::OutputError;

pub type OResult<T> = Result<T, OutputError>;

/// Create a directory and all of its missing parents. Does nothing if the
/// directory already exists.
pub fn mkdir<P>(path: P) -> OResult<()>
where P: AsRef<Path>
{
    fs::create_dir_all(path)?;
    Ok(())
}

/// Serialize `value` as JSON to the file at `path`, creating any missing parent
/// directories and overwriting an existing file.
pub fn write_json<P, T>(path: P, value: &T) -> OResult<()>
where
    P: AsRef<Path>,
    T: Serialize + ?Sized,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        mkdir(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray as nd;

    #[derive(Serialize)]
    struct Data {
        label: &'static str,
        x: nd::Array1<f64>,
    }

    #[test]
    fn writes_nested_json() {
        let dir = std::env::temp_dir()
            .join(format!("quant2d-output-{}", std::process::id()));
        let path = dir.join("nested").join("data.json");
        let data = Data { label: "line", x: nd::array![0.0, 0.5, 1.0] };
        write_json(&path, &data).unwrap();
        let read: serde_json::Value
            = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read["label"], "line");
        assert_eq!(read["x"]["dim"], serde_json::json!([3]));
        assert_eq!(read["x"]["data"], serde_json::json!([0.0, 0.5, 1.0]));
        fs::remove_dir_all(&dir).unwrap();
    }
}
