use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Ananya", "Dev", "Diya", "Ishaan", "Kavya", "Meera", "Nikhil", "Priya", "Rohan",
    "Saanvi", "Tanvi", "Vikram", "Zoë", "Émile", "Farhan",
];
const LAST_NAMES: &[&str] = &[
    "Sharma", "Iyer", "Rao", "Gupta", "Menon", "Khan", "Patel", "Nair", "Das", "Reddy",
];
const BRANCHES: &[(&str, f64)] = &[
    ("Computer Science", 7.9),
    ("Electronics", 7.4),
    ("Mechanical", 7.0),
    ("Civil", 6.8),
    ("Chemical", 7.2),
];
const SEMESTERS: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8"];

struct Student {
    name: String,
    branch: String,
    semester: String,
    cgpa: Option<f64>,
}

fn generate_students(rng: &mut SimpleRng, n: usize) -> Vec<Student> {
    (0..n)
        .map(|_| {
            let (branch, mean) = BRANCHES[(rng.next_u64() % BRANCHES.len() as u64) as usize];
            let name = format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES));
            // About one row in twenty has a missing grade.
            let cgpa = if rng.next_f64() < 0.05 {
                None
            } else {
                let raw = rng.gauss(mean, 0.9).clamp(4.0, 10.0);
                Some((raw * 100.0).round() / 100.0)
            };
            Student {
                name,
                branch: branch.to_string(),
                semester: rng.pick(SEMESTERS).to_string(),
                cgpa,
            }
        })
        .collect()
}

fn write_csv(path: &Path, students: &[Student]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating master.csv")?;
    writer.write_record(["Student Name", "Course Name", "Semester", "CGPA"])?;
    for s in students {
        let cgpa = s.cgpa.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([s.name.as_str(), s.branch.as_str(), s.semester.as_str(), cgpa.as_str()])?;
    }
    writer.flush().context("flushing master.csv")?;
    Ok(())
}

/// The parquet copy uses the alternate headers (`Semester No`, `GPA`).
fn write_parquet(path: &Path, students: &[Student]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Student Name", DataType::Utf8, false),
        Field::new("Course Name", DataType::Utf8, false),
        Field::new("Semester No", DataType::Utf8, false),
        Field::new("GPA", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(students.iter().map(|s| s.name.as_str()))),
            Arc::new(StringArray::from_iter_values(students.iter().map(|s| s.branch.as_str()))),
            Arc::new(StringArray::from_iter_values(students.iter().map(|s| s.semester.as_str()))),
            Arc::new(Float64Array::from(students.iter().map(|s| s.cgpa).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating master.parquet")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// A name list with a header row, mixed casing and a name not in the roster.
fn write_names(path: &Path, students: &[Student]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating names.csv")?;
    writer.write_record(["Name"])?;
    for s in students.iter().step_by(7).take(10) {
        writer.write_record([s.name.to_uppercase()])?;
    }
    writer.write_record(["Not A Student"])?;
    writer.flush().context("flushing names.csv")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "sample_data".to_string()),
    );
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let students = generate_students(&mut rng, 240);

    write_csv(&out_dir.join("master.csv"), &students)?;
    write_parquet(&out_dir.join("master.parquet"), &students)?;
    write_names(&out_dir.join("names.csv"), &students)?;

    log::info!("Wrote {} students to {}", students.len(), out_dir.display());
    println!(
        "Wrote {} students (master.csv, master.parquet, names.csv) to {}",
        students.len(),
        out_dir.display()
    );
    Ok(())
}
