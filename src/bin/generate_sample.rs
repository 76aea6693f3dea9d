use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;

use threadscope::data::schema::{SHEET_COLUMN, THREADS_COLUMN, TIME_COLUMN};
use threadscope::data::{ConfigLabel, ThreadTiming};

const THREAD_COUNTS: [u32; 6] = [1, 2, 4, 8, 16, 32];
const TRIALS: usize = 3;

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[-1, 1)`.
    fn jitter(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    }
}

/// Amdahl-style timing model of one machine.
struct Machine {
    serial_secs: f64,
    parallel_secs: f64,
    cores: u32,
    /// Extra seconds per thread beyond the core count (contention).
    oversubscription_secs: f64,
}

impl Machine {
    fn for_label(label: ConfigLabel) -> Self {
        match label {
            ConfigLabel::MacosM1Pro => Machine {
                serial_secs: 0.8,
                parallel_secs: 9.4,
                cores: 8,
                oversubscription_secs: 0.04,
            },
            ConfigLabel::UbuntuI7 => Machine {
                serial_secs: 1.1,
                parallel_secs: 10.9,
                cores: 8,
                oversubscription_secs: 0.09,
            },
        }
    }

    fn time(&self, threads: u32, rng: &mut SimpleRng) -> f64 {
        let effective = threads.min(self.cores) as f64;
        let extra = threads.saturating_sub(self.cores) as f64 * self.oversubscription_secs;
        let ideal = self.serial_secs + self.parallel_secs / effective + extra;
        let noisy = ideal * (1.0 + 0.03 * rng.jitter());
        (noisy * 1000.0).round() / 1000.0
    }
}

fn generate(rng: &mut SimpleRng) -> Vec<(ConfigLabel, Vec<ThreadTiming>)> {
    ConfigLabel::ALL
        .into_iter()
        .map(|label| {
            let machine = Machine::for_label(label);
            let rows = THREAD_COUNTS
                .iter()
                .flat_map(|&threads| std::iter::repeat(threads).take(TRIALS))
                .map(|threads| ThreadTiming::new(threads, machine.time(threads, rng)))
                .collect();
            (label, rows)
        })
        .collect()
}

fn write_xlsx(path: &Path, tables: &[(ConfigLabel, Vec<ThreadTiming>)]) -> Result<()> {
    let mut workbook = Workbook::new();
    for (label, rows) in tables {
        let ws = workbook.add_worksheet();
        ws.set_name(label.table_name())?;
        ws.write_string(0, 0, THREADS_COLUMN)?;
        ws.write_string(0, 1, TIME_COLUMN)?;
        for (i, row) in rows.iter().enumerate() {
            let r = u32::try_from(i + 1).context("too many rows")?;
            ws.write_number(r, 0, f64::from(row.thread_count))?;
            ws.write_number(r, 1, row.real_time_used)?;
        }
    }
    workbook.save(path).context("writing workbook")?;
    Ok(())
}

fn write_parquet(path: &Path, tables: &[(ConfigLabel, Vec<ThreadTiming>)]) -> Result<()> {
    let mut sheets = Vec::new();
    let mut threads = Vec::new();
    let mut times = Vec::new();
    for (label, rows) in tables {
        for row in rows {
            sheets.push(label.table_name());
            threads.push(i64::from(row.thread_count));
            times.push(row.real_time_used);
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new(SHEET_COLUMN, DataType::Utf8, false),
        Field::new(THREADS_COLUMN, DataType::Int64, false),
        Field::new(TIME_COLUMN, DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(sheets)),
            Arc::new(Int64Array::from(threads)),
            Arc::new(Float64Array::from(times)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("execution_time.xlsx"));

    let mut rng = SimpleRng::new(42);
    let tables = generate(&mut rng);

    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" => write_xlsx(&output_path, &tables)?,
        "parquet" | "pq" => write_parquet(&output_path, &tables)?,
        other => bail!("Unsupported output extension: .{other} (use .xlsx or .parquet)"),
    }

    println!(
        "Wrote {} tables ({} rows each) to {}",
        tables.len(),
        THREAD_COUNTS.len() * TRIALS,
        output_path.display()
    );
    Ok(())
}
