//! The line-oriented interchange format for clustering instances.
//!
//! An instance file starts with a header line `element_count partition_count`, followed by
//! one line per element name, followed by two lines per partition: a free-form name line
//! and a body line of comma-separated elements grouped into semicolon-separated clusters,
//! terminated by a period. Unclustered elements are simply absent from the body; they are
//! restored from the header's element list on reading.
use common::{CcError, CcResult};
use itertools::Itertools;
use partition::{Partition, PartitionCollection};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Reads a collection of partitions from the interchange format.
/// # Returns
/// An `Err` on any malformed line; the core never sees malformed input.
pub fn read_collection<R: BufRead>(reader: R) -> CcResult<PartitionCollection<String>> {
    let mut lines = reader.lines();

    let header = next_line(&mut lines)?;
    let mut counts = header.split_whitespace();
    let element_count: usize = counts
        .next()
        .ok_or_else(|| CcError::from("missing element count in header"))?
        .parse()?;
    let partition_count: usize = counts
        .next()
        .ok_or_else(|| CcError::from("missing partition count in header"))?
        .parse()?;

    let mut elements = BTreeSet::new();
    for _ in 0..element_count {
        elements.insert(next_line(&mut lines)?.trim().to_string());
    }
    if elements.len() != element_count {
        return Err(CcError::from("duplicate element name in instance file"));
    }

    let mut collection = PartitionCollection::new();
    for _ in 0..partition_count {
        let _name = next_line(&mut lines)?;
        let body = next_line(&mut lines)?;
        collection.push(parse_partition_body(&body, &elements)?)?;
    }
    Ok(collection)
}

fn next_line<B: BufRead>(lines: &mut std::io::Lines<B>) -> CcResult<String> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(CcError::from("unexpected end of instance file")),
    }
}

fn parse_partition_body(
    body: &str,
    elements: &BTreeSet<String>,
) -> CcResult<Partition<String>> {
    let body = body
        .trim()
        .strip_suffix('.')
        .ok_or_else(|| CcError::from("partition line is not terminated by a period"))?;

    let mut partition = Partition::from_elements(elements.iter().cloned());
    for cluster in body.split(';').filter(|cluster| !cluster.is_empty()) {
        let members: BTreeSet<String> = cluster
            .split(',')
            .map(|member| member.trim().to_string())
            .collect();
        for member in &members {
            if !elements.contains(member) {
                return Err(CcError::from(format!(
                    "partition mentions unknown element '{}'",
                    member
                )));
            }
        }
        partition.add_cluster(&members);
    }
    Ok(partition)
}

/// Reads a collection of partitions from a file in the interchange format.
pub fn read_collection_from_file<P: AsRef<Path>>(
    path: P,
) -> CcResult<PartitionCollection<String>> {
    let file = File::open(path).map_err(CcError::from)?;
    read_collection(BufReader::new(file))
        .map_err(CcError::rethrow_with("could not parse instance file"))
}

/// Formats a partition's clusters as the interchange body without the terminating period:
/// clusters separated by semicolons, members by commas, unclustered elements omitted.
pub fn format_clusters(partition: &Partition<String>) -> String {
    partition
        .clusters()
        .iter()
        .filter(|(id, members)| !id.is_unclustered() && !members.is_empty())
        .map(|(_, members)| members.iter().join(","))
        .join(";")
}

/// Writes a collection of partitions in the interchange format.
pub fn write_collection<W: Write>(
    mut writer: W,
    collection: &PartitionCollection<String>,
) -> CcResult<()> {
    let elements = collection.elements();
    writeln!(writer, "{} {}", elements.len(), collection.len())?;
    for element in &elements {
        writeln!(writer, "{}", element)?;
    }
    for (index, partition) in collection.iter().enumerate() {
        writeln!(writer, "clustering{}", index)?;
        writeln!(writer, "{}.", format_clusters(partition))?;
    }
    Ok(())
}

/// Writes a collection of partitions to a file in the interchange format.
pub fn write_collection_to_file<P: AsRef<Path>>(
    path: P,
    collection: &PartitionCollection<String>,
) -> CcResult<()> {
    let file = File::create(path)?;
    write_collection(BufWriter::new(file), collection)
}

/// Writes a single partition's body line to a file.
pub fn write_partition_to_file<P: AsRef<Path>>(
    path: P,
    partition: &Partition<String>,
) -> CcResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{}.", format_clusters(partition))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(elements: &[&str]) -> BTreeSet<String> {
        elements.iter().map(|s| s.to_string()).collect()
    }

    fn example_collection() -> PartitionCollection<String> {
        let mut c1 = Partition::from_elements(set(&["a", "b", "c", "d"]));
        c1.add_cluster(&set(&["a", "b"]));
        c1.add_cluster(&set(&["c"]));
        // d stays unclustered
        let mut c2 = Partition::from_elements(set(&["a", "b", "c", "d"]));
        c2.add_cluster(&set(&["a", "b", "c", "d"]));
        PartitionCollection::from_partitions(vec![c1, c2]).unwrap()
    }

    #[test]
    fn written_collections_read_back_identically() {
        let collection = example_collection();

        let mut buffer = Vec::new();
        write_collection(&mut buffer, &collection).unwrap();
        let restored = read_collection(buffer.as_slice()).unwrap();

        assert_eq!(collection, restored);
    }

    #[test]
    fn reader_parses_a_hand_written_instance() {
        let input = "3 2\na\nb\nc\nfirst\na,b;c.\nsecond\na;b,c.\n";
        let collection = read_collection(input.as_bytes()).unwrap();

        assert_eq!(collection.len(), 2);
        let first = collection.get(0).unwrap();
        assert!(first.co_clustered(&"a".to_string(), &"b".to_string()));
        assert!(!first.co_clustered(&"b".to_string(), &"c".to_string()));
    }

    #[test]
    fn unclustered_elements_survive_the_round_trip() {
        let collection = example_collection();
        let mut buffer = Vec::new();
        write_collection(&mut buffer, &collection).unwrap();
        let restored = read_collection(buffer.as_slice()).unwrap();

        assert_eq!(
            restored.get(0).unwrap().unclustered_elements(),
            set(&["d"])
        );
    }

    #[test]
    fn missing_period_is_an_error() {
        let input = "2 1\na\nb\nfirst\na,b\n";
        assert!(read_collection(input.as_bytes()).is_err());
    }

    #[test]
    fn unknown_elements_are_an_error() {
        let input = "2 1\na\nb\nfirst\na,z.\n";
        assert!(read_collection(input.as_bytes()).is_err());
    }

    #[test]
    fn truncated_files_are_an_error() {
        let input = "2 2\na\nb\nfirst\na,b.\n";
        assert!(read_collection(input.as_bytes()).is_err());
    }
}
