//! Writes a synthetic, Titanic-shaped passenger file for trying the
//! dashboard without the Kaggle download.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

#[derive(Parser)]
#[command(author, version, about = "Generate a synthetic Titanic passenger file")]
struct Args {
    /// Output path; a .parquet or .pq extension writes Parquet, anything else CSV
    #[arg(default_value = "train.csv")]
    output: PathBuf,
    /// Number of passengers
    #[arg(long, default_value_t = 891)]
    rows: usize,
    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

struct Passenger {
    id: i64,
    survived: i64,
    class: i64,
    name: String,
    sex: &'static str,
    age: Option<f64>,
    sib_sp: i64,
    parch: i64,
    fare: f64,
    embarked: &'static str,
}

const SURNAMES: [&str; 8] = [
    "Andersson", "Sage", "Johnson", "Carter", "Goodwin", "Brown", "Smith", "Kelly",
];
const PORTS: [&str; 3] = ["S", "C", "Q"];

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Passenger> {
    (0..rows)
        .map(|i| {
            let class = match rng.next_f64() {
                p if p < 0.24 => 1,
                p if p < 0.45 => 2,
                _ => 3,
            };
            let female = rng.chance(0.35);
            // Survival odds by sex and class, roughly as recorded.
            let p_survive = match (female, class) {
                (true, 1) => 0.97,
                (true, 2) => 0.92,
                (true, _) => 0.50,
                (false, 1) => 0.37,
                (false, 2) => 0.16,
                (false, _) => 0.14,
            };
            let age = (!rng.chance(0.2)).then(|| {
                let mean = [38.0, 30.0, 25.0][class as usize - 1];
                rng.gauss(mean, 13.0).clamp(0.42, 80.0).round()
            });
            let base_fare = [84.0, 20.0, 13.0][class as usize - 1];
            let fare = (rng.gauss(base_fare, base_fare * 0.4).max(0.0) * 100.0).round() / 100.0;
            let surname = SURNAMES[rng.below(SURNAMES.len() as u64) as usize];

            Passenger {
                id: i as i64 + 1,
                survived: rng.chance(p_survive) as i64,
                class,
                name: format!(
                    "{surname}, {} Passenger {}",
                    if female { "Mrs." } else { "Mr." },
                    i + 1
                ),
                sex: if female { "female" } else { "male" },
                age,
                sib_sp: rng.below(3) as i64,
                parch: rng.below(3) as i64,
                fare,
                embarked: PORTS[rng.below(PORTS.len() as u64) as usize],
            }
        })
        .collect()
}

const HEADER: [&str; 10] = [
    "PassengerId", "Survived", "Pclass", "Name", "Sex", "Age", "SibSp", "Parch", "Fare", "Embarked",
];

fn write_csv(path: &Path, passengers: &[Passenger]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(HEADER)?;
    for p in passengers {
        writer.write_record([
            p.id.to_string(),
            p.survived.to_string(),
            p.class.to_string(),
            p.name.clone(),
            p.sex.to_string(),
            p.age.map(|a| a.to_string()).unwrap_or_default(),
            p.sib_sp.to_string(),
            p.parch.to_string(),
            format!("{:.2}", p.fare),
            p.embarked.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, passengers: &[Passenger]) -> Result<()> {
    let ints = |f: fn(&Passenger) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(passengers.iter().map(f).collect::<Vec<_>>()))
    };
    let strings = |f: fn(&Passenger) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(passengers.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        ints(|p| p.id),
        ints(|p| p.survived),
        ints(|p| p.class),
        strings(|p| p.name.as_str()),
        strings(|p| p.sex),
        Arc::new(Float64Array::from(
            passengers.iter().map(|p| p.age).collect::<Vec<_>>(),
        )),
        ints(|p| p.sib_sp),
        ints(|p| p.parch),
        Arc::new(Float64Array::from(
            passengers.iter().map(|p| p.fare).collect::<Vec<_>>(),
        )),
        strings(|p| p.embarked),
    ];

    let types = [
        DataType::Int64,
        DataType::Int64,
        DataType::Int64,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Float64,
        DataType::Int64,
        DataType::Int64,
        DataType::Float64,
        DataType::Utf8,
    ];
    let schema = Arc::new(Schema::new(
        HEADER
            .iter()
            .zip(types)
            .map(|(name, ty)| Field::new(*name, ty, true))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let Args { output, rows, seed } = Args::parse();
    let mut rng = SimpleRng::new(seed);
    let passengers = generate(rows, &mut rng);

    match output.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(&output, &passengers)?,
        _ => write_csv(&output, &passengers)?,
    }

    let survived: i64 = passengers.iter().map(|p| p.survived).sum();
    log::info!("{survived} of {rows} synthetic passengers survived");
    println!("Wrote {rows} passengers to {}", output.display());
    Ok(())
}
