use common::{logging, CcResult};
use executables::{format, random};
use partition::PartitionCollection;
use rand::thread_rng;
use std::collections::BTreeSet;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Cli {
    #[structopt(help = "Number of elements of the random instance.")]
    elements: usize,
    #[structopt(help = "Number of clusterings of the random instance.")]
    partitions: usize,
    #[structopt(long, help = "Allow elements to stay unclustered.")]
    allow_unclustered: bool,
    #[structopt(long, help = "Write the instance to this file instead of stdout.")]
    output: Option<PathBuf>,
}

fn main() -> CcResult<()> {
    logging::init_logging()?;
    let args = Cli::from_args();

    let elements: BTreeSet<String> = (0..args.elements).map(|i| format!("e{}", i)).collect();
    let mut rng = thread_rng();
    let mut collection = PartitionCollection::new();
    for _ in 0..args.partitions {
        collection.push(random::random_partition(
            &elements,
            args.allow_unclustered,
            &mut rng,
        ))?;
    }
    log::info!(
        "generated {} random clusterings over {} elements",
        collection.len(),
        args.elements
    );

    match &args.output {
        Some(path) => format::write_collection_to_file(path, &collection)?,
        None => {
            let mut buffer = Vec::new();
            format::write_collection(&mut buffer, &collection)?;
            print!("{}", String::from_utf8_lossy(&buffer));
        }
    }
    Ok(())
}
