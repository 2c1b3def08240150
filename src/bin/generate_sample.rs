use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One output row, same columns as the city's trash schedule export.
#[derive(Serialize)]
struct Row {
    sam_address_id: i64,
    full_address: String,
    mailing_neighborhood: String,
    trashday: String,
    x_coord: f64,
    y_coord: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (neighborhood, centre longitude, centre latitude, streets)
const NEIGHBORHOODS: [(&str, f64, f64, &[&str]); 6] = [
    ("Allston", -71.1310, 42.3539, &["Harvard Ave", "Brighton Ave", "A St", "Linden St"]),
    ("Brighton", -71.1566, 42.3484, &["Washington St", "Market St", "Chestnut Hill Ave"]),
    ("Dorchester", -71.0621, 42.3016, &["Dorchester Ave", "Adams St", "Savin Hill Ave", "A St"]),
    ("Jamaica Plain", -71.1145, 42.3097, &["Centre St", "South St", "Green St"]),
    ("Roxbury", -71.0892, 42.3152, &["Blue Hill Ave", "Warren St", "Dudley St"]),
    ("South Boston", -71.0495, 42.3381, &["Broadway", "E 4th St", "B St", "A St"]),
];

const DAYS: [&str; 6] = ["M", "T", "W", "Th", "F", "TF"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut rows: Vec<Row> = Vec::new();
    let mut next_id: i64 = 100_000;

    for &(neighborhood, cx, cy, streets) in &NEIGHBORHOODS {
        for street in streets {
            // A street keeps one pickup pattern; its houses sit along a line.
            let day = DAYS[rng.below(DAYS.len())];
            let (sx, sy) = (rng.gauss(cx, 0.006), rng.gauss(cy, 0.004));
            let houses = 8 + rng.below(25);

            for h in 0..houses {
                let number = 2 * h + 1 + rng.below(2);
                let x = sx + h as f64 * 0.00018;
                let y = sy + h as f64 * 0.00009;
                // Multi-unit buildings: several addresses at one point.
                let units = if rng.next_f64() < 0.15 { 2 + rng.below(5) } else { 1 };
                for unit in 0..units {
                    let full_address = if units > 1 {
                        format!("{number} {street} #{}", unit + 1)
                    } else {
                        format!("{number} {street}")
                    };
                    rows.push(Row {
                        sam_address_id: next_id,
                        full_address,
                        mailing_neighborhood: neighborhood.to_string(),
                        trashday: day.to_string(),
                        x_coord: x,
                        y_coord: y,
                    });
                    next_id += 1;
                }
            }
        }
    }

    write_csv("trash.csv", &rows)?;
    write_parquet("trash.parquet", &rows)?;

    println!(
        "Wrote {} pickups in {} neighborhoods to trash.csv and trash.parquet",
        rows.len(),
        NEIGHBORHOODS.len()
    );
    Ok(())
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("sam_address_id", DataType::Int64, false),
        Field::new("full_address", DataType::Utf8, false),
        Field::new("mailing_neighborhood", DataType::Utf8, false),
        Field::new("trashday", DataType::Utf8, false),
        Field::new("x_coord", DataType::Float64, false),
        Field::new("y_coord", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.sam_address_id))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.full_address))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| &r.mailing_neighborhood),
            )),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.trashday))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.x_coord))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.y_coord))),
        ],
    )
    .context("building record batch")?;

    let preview = batch.slice(0, batch.num_rows().min(5));
    println!("{}", pretty_format_batches(&[preview]).context("formatting preview")?);

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}
