use anyhow::{Context, Result};

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Measurement {
    id: i64,
    sample: String,
    operator: String,
    concentration: f64,
    /// Mostly numbers with the odd free-text entry, to exercise lexical sorting.
    batch: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Measurement> {
    let samples = ["Sample_A", "Sample_B", "Sample_C"];
    let operators = ["Alice", "Bob"];
    let batches = ["7", "12", "101", "n/a"];

    let mut rows: Vec<Measurement> = (0..30)
        .map(|id| Measurement {
            id,
            sample: rng.pick(&samples).to_string(),
            operator: rng.pick(&operators).to_string(),
            concentration: (rng.next_f64() * 500.0).round() / 100.0,
            batch: rng.pick(&batches).to_string(),
        })
        .collect();

    // Exact copies so the duplicate filter has something to hide.
    for idx in [3usize, 3, 17] {
        let src = &rows[idx];
        let copy = Measurement {
            id: src.id,
            sample: src.sample.clone(),
            operator: src.operator.clone(),
            concentration: src.concentration,
            batch: src.batch.clone(),
        };
        rows.push(copy);
    }
    rows
}

fn write_csv(path: &str, rows: &[Measurement]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(["measurement_id", "sample", "operator", "concentration", "batch"])?;
    for m in rows {
        writer.write_record([
            m.id.to_string(),
            m.sample.clone(),
            m.operator.clone(),
            m.concentration.to_string(),
            m.batch.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_sqlite(path: &str, rows: &[Measurement]) -> Result<()> {
    if std::path::Path::new(path).exists() {
        std::fs::remove_file(path).context("replacing existing database")?;
    }
    let mut conn = rusqlite::Connection::open(path).context("creating SQLite database")?;
    conn.execute_batch(
        "CREATE TABLE measurements (
            measurement_id INTEGER,
            sample TEXT,
            operator TEXT,
            concentration REAL,
            batch TEXT
        );",
    )?;
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO measurements VALUES (?1, ?2, ?3, ?4, ?5)")?;
        for m in rows {
            stmt.execute(rusqlite::params![m.id, m.sample, m.operator, m.concentration, m.batch])?;
        }
    }
    tx.commit()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let csv_path = "sample_data.csv";
    let db_path = "sample_data.db";
    write_csv(csv_path, &rows)?;
    write_sqlite(db_path, &rows)?;

    println!(
        "Wrote {} measurements to {csv_path} and {db_path} (table `measurements`)",
        rows.len()
    );
    Ok(())
}
