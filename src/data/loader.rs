use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::{LoadError, LoadResult};
use super::model::{float_id, Dataset, Record};

/// Columns every input format must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "mailing_neighborhood",
    "full_address",
    "x_coord",
    "y_coord",
    "trashday",
    "sam_address_id",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a pickup dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – one header row, one record per row (the city export)
/// * `.parquet` – same columns; ids and coordinates are cast as needed
/// * `.json`    – `[{ "full_address": ..., "x_coord": ..., ... }, ...]`
pub fn load_file(path: &Path) -> LoadResult<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match ext.as_str() {
        "csv" => read_csv(file)?,
        "parquet" | "pq" => read_parquet(file)?,
        "json" => read_json(file)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::debug!("{} rows read from {}", records.len(), path.display());
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read comma-separated rows with a header line. Extra columns are ignored,
/// missing required ones are reported before any row is parsed.
pub fn read_csv<R: Read>(input: R) -> LoadResult<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(LoadError::MissingColumn(*missing));
    }

    reader
        .deserialize::<Record>()
        .map(|row| row.map_err(LoadError::from))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` layout.
fn read_json<R: Read>(input: R) -> LoadResult<Vec<Record>> {
    Ok(serde_json::from_reader(BufReader::new(input))?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Read every record batch of a Parquet file.
///
/// String columns may be stored as Utf8/LargeUtf8 or, for the address id,
/// as integers; coordinates may be any numeric type.  Everything is cast to
/// `Utf8` / `Float64` before extraction.
fn read_parquet(file: File) -> LoadResult<Vec<Record>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = records.len();

        let ids = id_column(&batch)?;
        let addresses = column_as(&batch, "full_address", &DataType::Utf8)?;
        let neighborhoods = column_as(&batch, "mailing_neighborhood", &DataType::Utf8)?;
        let days = column_as(&batch, "trashday", &DataType::Utf8)?;
        let xs = column_as(&batch, "x_coord", &DataType::Float64)?;
        let ys = column_as(&batch, "y_coord", &DataType::Float64)?;

        let ids = ids.as_string::<i32>();
        let addresses = addresses.as_string::<i32>();
        let neighborhoods = neighborhoods.as_string::<i32>();
        let days = days.as_string::<i32>();
        let xs = xs.as_primitive::<Float64Type>();
        let ys = ys.as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            let null = |column: &'static str, arr: &dyn Array| {
                if arr.is_null(row) {
                    Err(LoadError::NullValue {
                        column,
                        row: offset + row,
                    })
                } else {
                    Ok(())
                }
            };
            null("sam_address_id", ids)?;
            null("full_address", addresses)?;
            null("mailing_neighborhood", neighborhoods)?;
            null("trashday", days)?;
            null("x_coord", xs)?;
            null("y_coord", ys)?;

            records.push(Record {
                sam_address_id: ids.value(row).to_string(),
                full_address: addresses.value(row).to_string(),
                mailing_neighborhood: neighborhoods.value(row).to_string(),
                trashday: days.value(row).to_string(),
                x_coord: xs.value(row),
                y_coord: ys.value(row),
            });
        }
    }

    Ok(records)
}

fn column<'b>(batch: &'b RecordBatch, name: &'static str) -> LoadResult<&'b ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or(LoadError::MissingColumn(name))
}

/// Look up a column by name and cast it to `target`.
fn column_as(batch: &RecordBatch, name: &'static str, target: &DataType) -> LoadResult<ArrayRef> {
    Ok(cast(column(batch, name)?, target)?)
}

/// Address ids as `Utf8`. Float ids are formatted like the CSV and JSON
/// readers do, so `42.0` becomes `"42"` rather than Arrow's `"42.0"`.
fn id_column(batch: &RecordBatch) -> LoadResult<ArrayRef> {
    let raw = column(batch, "sam_address_id")?;
    if !raw.data_type().is_floating() {
        return Ok(cast(raw, &DataType::Utf8)?);
    }
    let floats = cast(raw, &DataType::Float64)?;
    let ids: StringArray = floats
        .as_primitive::<Float64Type>()
        .iter()
        .map(|id| id.map(float_id))
        .collect();
    Ok(Arc::new(ids))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float32Array, Float64Array, Int64Array};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::{Builder, NamedTempFile};

    use super::*;

    const SAMPLE_CSV: &str = "\
sam_address_id,full_address,mailing_neighborhood,trashday,x_coord,y_coord,zip_code
1,10 A St,Allston,M,-71.13,42.35,02134
2,20 B St,Allston,T,-71.12,42.36,02134
3,30 A St,Brighton,M,-71.15,42.34,02135
";

    fn temp_with(ext: &str, contents: &str) -> NamedTempFile {
        let mut tmp = Builder::new().suffix(ext).tempfile().unwrap();
        write!(tmp, "{contents}").unwrap();
        tmp
    }

    #[test]
    fn csv_rows_become_typed_records() {
        let records = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].full_address, "10 A St");
        assert_eq!(records[0].sam_address_id, "1");
        assert_eq!(records[2].mailing_neighborhood, "Brighton");
        assert!((records[1].y_coord - 42.36).abs() < 1e-12);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let err = read_csv("full_address,mailing_neighborhood\n1 A St,Allston\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("x_coord")));
    }

    #[test]
    fn csv_bad_coordinate_fails() {
        let csv = "sam_address_id,full_address,mailing_neighborhood,trashday,x_coord,y_coord\n\
                   1,10 A St,Allston,M,west,42.35\n";
        assert!(matches!(read_csv(csv.as_bytes()), Err(LoadError::Csv(_))));
    }

    #[test]
    fn load_file_dispatches_csv() {
        let tmp = temp_with(".csv", SAMPLE_CSV);
        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.neighborhoods(), ["Allston", "Brighton"]);
    }

    #[test]
    fn load_file_reads_json_records() {
        let tmp = temp_with(
            ".json",
            r#"[{"sam_address_id": 7, "full_address": "5 C St", "mailing_neighborhood": "Fenway",
                 "trashday": "W", "x_coord": -71.09, "y_coord": 42.34}]"#,
        );
        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.records()[0].sam_address_id, "7");
        assert_eq!(ds.neighborhoods(), ["Fenway"]);
    }

    #[test]
    fn load_file_reads_parquet_with_casts() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("sam_address_id", DataType::Int64, false),
            Field::new("full_address", DataType::Utf8, false),
            Field::new("mailing_neighborhood", DataType::Utf8, false),
            Field::new("trashday", DataType::Utf8, false),
            Field::new("x_coord", DataType::Float32, false),
            Field::new("y_coord", DataType::Float32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![11, 12])),
                Arc::new(StringArray::from(vec!["1 A St", "2 B St"])),
                Arc::new(StringArray::from(vec!["Allston", "Brighton"])),
                Arc::new(StringArray::from(vec!["M", "TF"])),
                Arc::new(Float32Array::from(vec![-71.5_f32, -71.25])),
                Arc::new(Float32Array::from(vec![42.5_f32, 42.25])),
            ],
        )
        .unwrap();

        let tmp = Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(tmp.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].sam_address_id, "11");
        assert_eq!(ds.records()[1].trashday, "TF");
        assert_eq!(ds.records()[0].x_coord, -71.5);
    }

    fn write_parquet(batch: &RecordBatch) -> NamedTempFile {
        let tmp = Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(tmp.reopen().unwrap(), batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        tmp
    }

    #[test]
    fn parquet_float_ids_read_like_csv_ones() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("sam_address_id", DataType::Float64, true),
            Field::new("full_address", DataType::Utf8, false),
            Field::new("mailing_neighborhood", DataType::Utf8, false),
            Field::new("trashday", DataType::Utf8, false),
            Field::new("x_coord", DataType::Float64, false),
            Field::new("y_coord", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![42.0, 7.5])),
                Arc::new(StringArray::from(vec!["1 A St", "2 B St"])),
                Arc::new(StringArray::from(vec!["Allston", "Allston"])),
                Arc::new(StringArray::from(vec!["M", "T"])),
                Arc::new(Float64Array::from(vec![-71.1, -71.2])),
                Arc::new(Float64Array::from(vec![42.3, 42.4])),
            ],
        )
        .unwrap();
        let tmp = write_parquet(&batch);

        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.records()[0].sam_address_id, "42");
        assert_eq!(ds.records()[1].sam_address_id, "7.5");

        let csv = "sam_address_id,full_address,mailing_neighborhood,trashday,x_coord,y_coord\n\
                   42.0,1 A St,Allston,M,-71.1,42.3\n";
        assert_eq!(read_csv(csv.as_bytes()).unwrap()[0].sam_address_id, "42");
    }

    #[test]
    fn parquet_null_id_is_reported() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("sam_address_id", DataType::Float64, true),
            Field::new("full_address", DataType::Utf8, false),
            Field::new("mailing_neighborhood", DataType::Utf8, false),
            Field::new("trashday", DataType::Utf8, false),
            Field::new("x_coord", DataType::Float64, false),
            Field::new("y_coord", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![Some(1.0), None])),
                Arc::new(StringArray::from(vec!["1 A St", "2 B St"])),
                Arc::new(StringArray::from(vec!["Allston", "Allston"])),
                Arc::new(StringArray::from(vec!["M", "T"])),
                Arc::new(Float64Array::from(vec![-71.1, -71.2])),
                Arc::new(Float64Array::from(vec![42.3, 42.4])),
            ],
        )
        .unwrap();
        let tmp = write_parquet(&batch);

        let err = load_file(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::NullValue {
                column: "sam_address_id",
                row: 1
            }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/trash.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let tmp = temp_with(".xlsx", "");
        let err = load_file(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }
}
