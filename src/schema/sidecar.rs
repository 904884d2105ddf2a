use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::LoadError;
use crate::types::{ColumnSchema, ColumnType, TableSchema};

/// Base name of a source file with every extension stripped:
/// `batting.csv.gz` -> `batting`.
pub fn file_stem(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.split('.').next().unwrap_or("").to_string()
}

/// Path of the sidecar type file for a source dataset:
/// `lahman/wrangled/batting.csv.gz` -> `lahman/wrangled/batting_types.csv`.
pub fn sidecar_path(source: &Path) -> PathBuf {
    let mut path = source.to_path_buf();
    path.set_file_name(format!("{}_types.csv", file_stem(source)));
    path
}

/// Open a source dataset for reading, decompressing gzip on the fly.
///
/// The decompressed stream is never materialized on disk.
pub fn open_source(source: &Path) -> Result<Box<dyn Read + Send>, LoadError> {
    let file = File::open(source)?;
    if source.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read the header row of a source dataset for column order.
fn read_header(source: &Path) -> Result<Vec<String>, LoadError> {
    let reader = open_source(source)?;
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let header = csv.headers()?.iter().map(|h| h.to_string()).collect();
    Ok(header)
}

/// Read the sidecar type file into a column -> type lookup.
fn read_types(sidecar: &Path) -> Result<HashMap<String, ColumnType>, LoadError> {
    let file = File::open(sidecar).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            LoadError::sidecar(format!("type file {} not found", sidecar.display()))
        }
        _ => LoadError::Io(e),
    })?;

    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let mut types = HashMap::new();
    for record in csv.records() {
        let record = record?;
        let column = record.get(0).ok_or_else(|| {
            LoadError::sidecar(format!("malformed row in {}", sidecar.display()))
        })?;
        let dtype = record.get(1).ok_or_else(|| {
            LoadError::sidecar(format!(
                "column '{}' has no dtype in {}",
                column,
                sidecar.display()
            ))
        })?;
        types.insert(column.to_string(), ColumnType::parse(column, dtype)?);
    }
    Ok(types)
}

/// Read column metadata only for a source dataset: the CSV header for
/// column order and the sidecar type file for per-column types.
///
/// No data rows are inspected; those flow straight through COPY later.
pub fn read_schema(source: &Path) -> Result<TableSchema, LoadError> {
    let header = read_header(source)?;
    let types = read_types(&sidecar_path(source))?;

    let mut columns = Vec::with_capacity(header.len());
    for name in header {
        let dtype = types.get(&name).copied().ok_or_else(|| {
            LoadError::sidecar(format!(
                "column '{}' of {} has no entry in its type file",
                name,
                source.display()
            ))
        })?;
        columns.push(ColumnSchema { name, dtype });
    }
    Ok(TableSchema { columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    fn write_fixture(dir: &Path, name: &str, data: &str, types: &str) -> PathBuf {
        let source = dir.join(name);
        if name.ends_with(".gz") {
            let file = File::create(&source).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder.write_all(data.as_bytes()).unwrap();
            encoder.finish().unwrap();
        } else {
            std::fs::write(&source, data).unwrap();
        }
        std::fs::write(sidecar_path(&source), types).unwrap();
        source
    }

    #[test]
    fn test_file_stem_strips_all_extensions() {
        assert_eq!(file_stem(Path::new("people.csv")), "people");
        assert_eq!(file_stem(Path::new("data/batting.csv.gz")), "batting");
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("w/batting.csv.gz")),
            PathBuf::from("w/batting_types.csv")
        );
        assert_eq!(
            sidecar_path(Path::new("people.csv")),
            PathBuf::from("people_types.csv")
        );
    }

    #[test]
    fn test_read_schema_follows_header_order() {
        let dir = TempDir::new().unwrap();
        // sidecar rows deliberately out of header order
        let source = write_fixture(
            dir.path(),
            "people.csv",
            "player_id,name_first,name_last\naaroh101,Hank,Aaron\n",
            "column,dtype\nname_last,object\nplayer_id,object\nname_first,object\n",
        );

        let schema = read_schema(&source).unwrap();
        let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["player_id", "name_first", "name_last"]);
    }

    #[test]
    fn test_read_schema_gzip_matches_plain() {
        let dir = TempDir::new().unwrap();
        let data = "game_id,ab,hr\nBOS201904090,4,1\n";
        let types = "column,dtype\ngame_id,object\nab,uint8\nhr,uint8\n";

        let plain = write_fixture(dir.path(), "batting.csv", data, types);
        let gz = write_fixture(dir.path(), "game.csv.gz", data, types);

        assert_eq!(read_schema(&plain).unwrap(), read_schema(&gz).unwrap());
    }

    #[test]
    fn test_missing_sidecar_is_an_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("people.csv");
        std::fs::write(&source, "player_id\naaroh101\n").unwrap();

        let err = read_schema(&source).unwrap_err();
        assert!(matches!(err, LoadError::Sidecar { .. }));
    }

    #[test]
    fn test_column_without_type_entry_is_an_error() {
        let dir = TempDir::new().unwrap();
        let source = write_fixture(
            dir.path(),
            "people.csv",
            "player_id,retro_id\naaroh101,aaroh101\n",
            "column,dtype\nplayer_id,object\n",
        );

        let err = read_schema(&source).unwrap_err();
        match err {
            LoadError::Sidecar { message } => assert!(message.contains("retro_id")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_dtype_is_an_error() {
        let dir = TempDir::new().unwrap();
        let source = write_fixture(
            dir.path(),
            "people.csv",
            "player_id\naaroh101\n",
            "column,dtype\nplayer_id,timedelta64[ns]\n",
        );

        let err = read_schema(&source).unwrap_err();
        assert!(matches!(err, LoadError::UnrecognizedType { .. }));
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let err = read_schema(Path::new("/nonexistent/people.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
