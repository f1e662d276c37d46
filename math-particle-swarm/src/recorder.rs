use crate::error::Result;
use crate::{CallbackFn, PSOIntermediate};
use directories::ProjectDirs;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Records the global best of a run after every iteration
#[derive(Debug)]
pub struct ConvergenceRecorder {
    /// Run name (used for CSV filename)
    run_name: String,
    /// Output directory for CSV files
    output_dir: PathBuf,
    /// Shared record storage, filled by the callback
    records: Arc<Mutex<Vec<ConvergenceRecord>>>,
}

/// Global best after one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceRecord {
    /// Iteration number, starting at 1
    pub iteration: usize,
    /// Global best fitness
    pub best_fitness: f64,
    /// Global best position
    pub best_position: Vec<f64>,
    /// Whether this iteration improved the global best
    pub is_improvement: bool,
}

/// Default records directory: the user cache dir, or `./data_generated/records`.
fn default_records_dir() -> PathBuf {
    match ProjectDirs::from("org", "spinorama", "math-audio") {
        Some(proj_dirs) => proj_dirs.cache_dir().join("records"),
        None => PathBuf::from("./data_generated/records"),
    }
}

fn lock(records: &Mutex<Vec<ConvergenceRecord>>) -> MutexGuard<'_, Vec<ConvergenceRecord>> {
    // a panicking callback leaves the records usable
    records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ConvergenceRecorder {
    /// Create a recorder saving into the default records directory
    pub fn new(run_name: impl Into<String>) -> Self {
        Self::with_output_dir(run_name, default_records_dir())
    }

    /// Create a recorder with custom output directory
    pub fn with_output_dir(run_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            run_name: run_name.into(),
            output_dir: output_dir.into(),
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a callback appending one record per iteration
    pub fn create_callback(&self) -> CallbackFn {
        let records = self.records.clone();
        Box::new(move |intermediate: &PSOIntermediate| {
            let mut guard = lock(&records);
            let is_improvement = match guard.last() {
                Some(prev) => intermediate.fun < prev.best_fitness,
                None => true,
            };
            guard.push(ConvergenceRecord {
                iteration: intermediate.iter,
                best_fitness: intermediate.fun,
                best_position: intermediate.x.to_vec(),
                is_improvement,
            });
        })
    }

    /// Snapshot of the records collected so far
    pub fn records(&self) -> Vec<ConvergenceRecord> {
        lock(&self.records).clone()
    }

    /// Path of the CSV file written by [`save_csv`](Self::save_csv)
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.run_name))
    }

    /// Write all records to `<output_dir>/<run_name>.csv` and return its path
    pub fn save_csv(&self) -> Result<PathBuf> {
        create_dir_all(&self.output_dir)?;
        let path = self.csv_path();
        let mut writer = BufWriter::new(File::create(&path)?);

        let records = self.records();
        let dims = records.first().map_or(0, |r| r.best_position.len());
        write!(writer, "iteration,best_fitness")?;
        for d in 0..dims {
            write!(writer, ",x{}", d)?;
        }
        writeln!(writer, ",is_improvement")?;

        for r in &records {
            write!(writer, "{},{:.9e}", r.iteration, r.best_fitness)?;
            for x in &r.best_position {
                write!(writer, ",{:.9e}", x)?;
            }
            writeln!(writer, ",{}", r.is_improvement)?;
        }
        writer.flush()?;
        Ok(path)
    }
}
