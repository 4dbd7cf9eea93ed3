use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One synthetic listing. `None` marks a missing cell.
struct Row {
    price: f64,
    model_year: Option<i64>,
    model: &'static str,
    condition: &'static str,
    fuel: &'static str,
    odometer: Option<f64>,
    kind: &'static str,
    paint_color: Option<&'static str>,
}

const MODELS: [(&str, &str, f64); 8] = [
    ("ford f-150", "truck", 26000.0),
    ("chevrolet silverado 1500", "pickup", 24000.0),
    ("toyota camry", "sedan", 14000.0),
    ("honda civic", "sedan", 12000.0),
    ("jeep wrangler", "SUV", 22000.0),
    ("subaru outback", "wagon", 15000.0),
    ("nissan altima", "sedan", 11000.0),
    ("ford explorer", "SUV", 17000.0),
];
const CONDITIONS: [&str; 6] = ["excellent", "good", "like new", "fair", "new", "salvage"];
const FUELS: [&str; 4] = ["gas", "gas", "diesel", "hybrid"];
const COLORS: [&str; 6] = ["white", "black", "silver", "red", "blue", "grey"];

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    (0..n)
        .map(|_| {
            let (model, kind, base) = MODELS[(rng.next_u64() % MODELS.len() as u64) as usize];
            let year = 2019 - (rng.next_f64() * 20.0) as i64;
            let age = (2019 - year) as f64;
            let condition = rng.pick(&CONDITIONS);

            let odometer = (age * 12000.0 + rng.gauss(0.0, 15000.0)).max(0.0).round();
            let wear = match condition {
                "new" | "like new" => 1.15,
                "excellent" => 1.0,
                "good" => 0.9,
                "fair" => 0.65,
                _ => 0.4,
            };
            let mut price = (base * wear * 0.92f64.powf(age) + rng.gauss(0.0, 1500.0))
                .max(1.0)
                .round();
            if rng.chance(0.01) {
                price = -1.0;
            }

            Row {
                price,
                model_year: (!rng.chance(0.07)).then_some(year),
                model,
                condition,
                fuel: rng.pick(&FUELS),
                odometer: (!rng.chance(0.15)).then_some(odometer),
                kind,
                paint_color: (!rng.chance(0.18)).then(|| rng.pick(&COLORS)),
            }
        })
        .collect()
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "price",
        "model_year",
        "model",
        "condition",
        "fuel",
        "odometer",
        "type",
        "paint_color",
    ])?;
    for row in rows {
        writer.write_record([
            row.price.to_string(),
            row.model_year.map(|y| y.to_string()).unwrap_or_default(),
            row.model.to_string(),
            row.condition.to_string(),
            row.fuel.to_string(),
            row.odometer.map(|o| o.to_string()).unwrap_or_default(),
            row.kind.to_string(),
            row.paint_color.unwrap_or_default().to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("price", DataType::Float64, false),
        Field::new("model_year", DataType::Int64, true),
        Field::new("model", DataType::Utf8, false),
        Field::new("condition", DataType::Utf8, false),
        Field::new("fuel", DataType::Utf8, false),
        Field::new("odometer", DataType::Float64, true),
        Field::new("type", DataType::Utf8, false),
        Field::new("paint_color", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.price))),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.model_year).collect::<Vec<_>>())),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.model))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.condition))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.fuel))),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.odometer).collect::<Vec<_>>())),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.kind))),
        Arc::new(StringArray::from(rows.iter().map(|r| r.paint_color).collect::<Vec<_>>())),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 5000);

    write_csv("vehicles_us.csv", &rows)?;
    write_parquet("vehicles_us.parquet", &rows)?;

    println!(
        "Wrote {} listings to vehicles_us.csv and vehicles_us.parquet",
        rows.len()
    );
    Ok(())
}
