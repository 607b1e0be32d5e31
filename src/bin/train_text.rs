//! Demo trainer: learn a position-shifted re-encoding of an English text.
//!
//! The same file is read through two fragment readers whose position keys
//! differ, producing paired (input, output) sparse vectors. The space is
//! trained on the pairs, then the file is replayed and the live points'
//! votes are assembled into predicted output vectors, reported against
//! the expected ones as XOR bit differences and precision/recall/F1.
//!
//! ```bash
//! train-text ./texts/children_of_the_frost.txt --space-length 600000 --max-steps 2000
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use parking_lot::Mutex;
use tracing::info;

use combispace::{
    BitVec, ConceptSystem, FragmentReader, PointId, RandomVectorBuilder, SpaceBuilder,
    SpaceConfig, VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "train-text", version, about = "Train a combinatorial space on a text file")]
struct Args {
    /// Text file to train and check on.
    path: PathBuf,

    /// Number of points in the space.
    #[arg(long, default_value_t = 600_000)]
    space_length: usize,

    /// Input bits each point watches.
    #[arg(long, default_value_t = 32)]
    tracking_bits: usize,

    /// Active tracking bits needed to form a cluster.
    #[arg(long, default_value_t = 6)]
    creation_threshold: usize,

    /// Active cluster bits needed to fire.
    #[arg(long, default_value_t = 4)]
    activation_threshold: usize,

    /// Concept / input / output vector length in bits.
    #[arg(long, default_value_t = 256)]
    vector_len: usize,

    /// Set bits per concept vector.
    #[arg(long, default_value_t = 8)]
    mask_len: usize,

    /// Characters per fragment frame.
    #[arg(long, default_value_t = 5)]
    fragment_len: usize,

    /// Number of position keys in the concept system.
    #[arg(long, default_value_t = 5)]
    positions: u8,

    /// Stop training after this many fragment pairs.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Fixed seed for concepts and tracking masks (reproducible runs).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    info!(version = VERSION, path = %args.path.display(), "train-text starting");

    let mut vector_builder = match args.seed {
        Some(seed) => RandomVectorBuilder::with_seed(seed),
        None => RandomVectorBuilder::new(),
    };
    let system = ConceptSystem::build(
        &mut vector_builder,
        args.positions,
        args.vector_len,
        args.mask_len,
    );

    // Caller-owned accumulators, fed by the space's notifications.
    let live: Arc<Mutex<HashSet<PointId>>> = Arc::new(Mutex::new(HashSet::new()));
    let predicted = Arc::new(Mutex::new(BitVec::zeros(args.vector_len)));

    let config = SpaceConfig {
        space_length: args.space_length,
        tracking_bits: args.tracking_bits,
        creation_threshold: args.creation_threshold,
        activation_threshold: args.activation_threshold,
        input_len: args.vector_len,
        output_len: args.vector_len,
    };

    let mut builder = SpaceBuilder::new(config)?
        .on_cluster_created({
            let live = live.clone();
            Arc::new(move |id, _| {
                live.lock().insert(id);
            })
        })
        .on_cluster_destroyed({
            let live = live.clone();
            Arc::new(move |id| {
                live.lock().remove(&id);
            })
        })
        .on_point_activated({
            let predicted = predicted.clone();
            Arc::new(move |_, bit| {
                predicted.lock().set_bit(bit, true);
            })
        });
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let mut space = builder.build();
    info!(points = space.len(), "combinatorial space built");

    // Training pass: same file through two readers, position keys 0 and 1.
    let input_file = open(&args.path)?;
    let output_file = open(&args.path)?;
    let inputs = FragmentReader::new(&system, input_file, args.fragment_len, 0);
    let outputs = FragmentReader::new(&system, output_file, args.fragment_len, 1);

    let mut step = 0usize;
    for (input, output) in inputs.zip(outputs) {
        let input = input?;
        let output = output?;
        space.train_all(Some(&input.vector), Some(&output.vector))?;
        step += 1;
        if step % 500 == 0 {
            info!(step, live = live.lock().len(), "training");
        }
        if args.max_steps.is_some_and(|max| step >= max) {
            break;
        }
    }
    info!(steps = step, live = live.lock().len(), "training finished");

    // Check pass: replay the file and score the live points' votes.
    let input_file = open(&args.path)?;
    let output_file = open(&args.path)?;
    let inputs = FragmentReader::new(&system, input_file, args.fragment_len, 0);
    let outputs = FragmentReader::new(&system, output_file, args.fragment_len, 1);

    let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);
    let mut checked = 0usize;
    let mut diff_total = 0usize;

    for (input, expected) in inputs.zip(outputs) {
        let input = input?;
        let expected = expected?;
        if args.max_steps.is_some_and(|max| checked >= max) {
            break;
        }

        predicted.lock().clear();
        let ids: Vec<PointId> = live.lock().iter().copied().collect();
        space.check_points(&ids, &input.vector)?;
        let actual = predicted.lock().clone();

        diff_total += expected.vector.hamming(&actual)?;
        for bit in actual.iter_ones() {
            if expected.vector.get_bit(bit) {
                tp += 1;
            } else {
                fp += 1;
            }
        }
        for bit in expected.vector.iter_ones() {
            if !actual.get_bit(bit) {
                fn_ += 1;
            }
        }
        checked += 1;
    }

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    println!("fragments checked:   {checked}");
    println!("live points:         {}", live.lock().len());
    println!(
        "avg differing bits:  {:.2}",
        if checked > 0 { diff_total as f64 / checked as f64 } else { 0.0 }
    );
    println!("precision:           {precision:.4}");
    println!("recall:              {recall:.4}");
    println!("f1:                  {f1:.4}");

    Ok(())
}

fn open(path: &PathBuf) -> anyhow::Result<BufReader<File>> {
    Ok(BufReader::new(
        File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
    ))
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
