//! hugearray bench binary
//!
//! Fills a mapped array, reads it back and reports timings.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use hugearray::storage::{AnonymousMap, MappedFile, MemoryMap};
use hugearray::{ArrayConfig, HugeArray, HugeArrayError, MappedHugeArray, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Write/verify workload over a segmented mapped array
#[derive(Parser, Debug)]
#[command(name = "hugearray-bench")]
#[command(about = "Exercise a segmented memory-mapped array")]
#[command(version)]
struct Args {
    /// Backing file (anonymous memory if omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of u64 elements
    #[arg(short, long, default_value = "10000000")]
    len: u64,

    /// Elements per segment (power of two)
    #[arg(short, long, default_value = "1048576")]
    segment_capacity: u64,

    /// Index visiting order
    #[arg(short, long, value_enum, default_value = "sequential")]
    pattern: Pattern,

    /// Stride used by the strided pattern
    #[arg(long, default_value = "4099")]
    stride: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Pattern {
    /// 0, 1, 2, ...
    Sequential,
    /// i * stride mod len; revisits indices when stride and len share a factor
    Strided,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hugearray=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("hugearray-bench v{}", hugearray::VERSION);

    let config = ArrayConfig::builder()
        .segment_capacity(args.segment_capacity)
        .build();

    let outcome = match &args.file {
        Some(path) => {
            tracing::info!("Backing file: {}", path.display());
            MappedHugeArray::<u64, MappedFile>::create(path, args.len, &config)
                .and_then(|array| run(array, &args))
        }
        None => {
            tracing::info!("Backing store: anonymous memory");
            MappedHugeArray::<u64, AnonymousMap>::anonymous(args.len, &config)
                .and_then(|array| run(array, &args))
        }
    };

    if let Err(e) = outcome {
        tracing::error!("Bench failed: {}", e);
        std::process::exit(1);
    }
}

fn run<M: MemoryMap>(mut array: MappedHugeArray<u64, M>, args: &Args) -> Result<()> {
    let len = array.len();
    let visit = |step: u64| match args.pattern {
        Pattern::Sequential => step,
        Pattern::Strided => step.wrapping_mul(args.stride) % len,
    };

    tracing::info!(
        len,
        segments = array.segment_count(),
        buffer_size = array.layout().buffer_size(),
        "array ready"
    );

    let started = Instant::now();
    for step in 0..len {
        let index = visit(step);
        array.set(index, index)?;
    }
    tracing::info!("write: {:?}", started.elapsed());

    let started = Instant::now();
    let mut mismatches = 0u64;
    for step in 0..len {
        let index = visit(step);
        if array.get(index)? != index {
            mismatches += 1;
        }
    }
    tracing::info!("read: {:?}", started.elapsed());

    let stats = array.stats();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        loads = stats.loads,
        flushes = stats.flushes,
        "window stats"
    );

    let started = Instant::now();
    array.release()?;
    tracing::info!("release: {:?}", started.elapsed());

    if mismatches > 0 {
        return Err(HugeArrayError::Storage(format!(
            "{} elements read back a value other than the one written",
            mismatches
        )));
    }
    Ok(())
}
