use common::{logging, CancelCell, CcError, CcResult, Control, ProgressCell};
use consensus::{consensus_clustering, ConsensusConfig, Preprocessing};
use executables::format;
use indicatif::ProgressBar;
use partition::{avg_distance, distance_to_collection};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Cli {
    #[structopt(help = "Instance file holding the input clusterings.")]
    input: PathBuf,
    #[structopt(
        long,
        help = "Write the consensus clustering to this file instead of stdout."
    )]
    output: Option<PathBuf>,
    #[structopt(
        long,
        help = "Additionally write the consensus clustering as JSON to this file."
    )]
    json: Option<PathBuf>,
    #[structopt(long, help = "Skip the kernelization and search right away.")]
    no_preprocessing: bool,
    #[structopt(
        long,
        help = "Run at most this many preprocessing passes instead of reaching the fixed point."
    )]
    passes: Option<usize>,
}

fn main() -> CcResult<()> {
    logging::init_logging()?;
    let args = Cli::from_args();

    let collection = format::read_collection_from_file(&args.input)?;
    log::info!(
        "loaded {} clusterings over {} elements",
        collection.len(),
        collection.elements().len()
    );
    if collection.len() > 1 {
        log::info!("average distance of the input: {}", avg_distance(&collection));
    }

    let preprocessing = if args.no_preprocessing {
        Preprocessing::Off
    } else if let Some(passes) = args.passes {
        Preprocessing::Bounded(passes)
    } else {
        Preprocessing::ToFixedPoint
    };
    let config = ConsensusConfig { preprocessing };

    // the worker runs the synchronous core; this thread only samples the progress cell
    let cancel = Arc::new(CancelCell::new());
    let progress = Arc::new(ProgressCell::new());
    let (sender, receiver) = mpsc::channel();

    let worker_collection = collection.clone();
    let worker_cancel = Arc::clone(&cancel);
    let worker_progress = Arc::clone(&progress);
    let worker = thread::spawn(move || {
        let control = Control::new(Some(worker_cancel.as_ref()), Some(worker_progress.as_ref()));
        let result = consensus_clustering(&worker_collection, &config, control);
        // the receiver only disappears if the main thread is already gone
        let _ = sender.send(result);
    });

    let bar = ProgressBar::new(100);
    let result = loop {
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(result) => break result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                bar.set_position((progress.get() * 100.0) as u64);
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(CcError::from("worker thread died before sending a result"));
            }
        }
    };
    bar.finish_and_clear();
    worker.join().map_err(|_| "worker thread panicked")?;

    match result {
        Ok(clustering) => {
            log::info!(
                "optimal consensus clustering found, total distance {}",
                distance_to_collection(&clustering, &collection)
            );
            match &args.output {
                Some(path) => format::write_partition_to_file(path, &clustering)?,
                None => println!("{}.", format::format_clusters(&clustering)),
            }
            if let Some(path) = &args.json {
                common::util::write_serializable_to_json(&clustering, path)?;
            }
        }
        Err(_) => log::warn!("the computation was cancelled before completing"),
    }
    Ok(())
}
