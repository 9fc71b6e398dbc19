//! Plain-text edge-list and clustering I/O.
//!
//! Grounded on the original source's `read_graph_txt`/`read_clustering`
//! (`io.hpp`): one undirected edge per line as `tail head [weight]`
//! (weight defaults to 1, self-loops given as `v v [weight]`), and one
//! cluster id per line, indexed by node id, for clustering files. Edge
//! list node ids are 1-based on input and decremented to 0-based here,
//! matching the original format.

use louvain_core::error::LouvainError;
use louvain_core::{ClusterId, NodeId, Weight};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Reads a half-edge list and returns it alongside the inferred node
/// count (`max node id + 1`). Each line lists an undirected edge once;
/// the caller (`Graph::from_half_edges`) expects both directed
/// half-edges for `u != v`, so this doubles non-loop lines here.
pub fn read_graph_txt(path: &Path) -> Result<(Vec<(NodeId, NodeId, Weight)>, NodeId), LouvainError> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut edges = Vec::new();
    let mut max_node = 0i64;

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        let parse_field = |field: Option<&str>, name: &str| -> Result<i64, LouvainError> {
            field
                .ok_or_else(|| LouvainError::Ingestion {
                    line: line_index + 1,
                    reason: format!("missing {name}"),
                })?
                .parse::<i64>()
                .map_err(|_| LouvainError::Ingestion {
                    line: line_index + 1,
                    reason: format!("{name} is not an integer"),
                })
        };

        let tail = parse_field(fields.next(), "tail node id")?;
        let head = parse_field(fields.next(), "head node id")?;
        let weight = match fields.next() {
            Some(field) => field.parse::<i64>().map_err(|_| LouvainError::Ingestion {
                line: line_index + 1,
                reason: "weight is not an integer".to_string(),
            })?,
            None => 1,
        };

        if tail < 1 || head < 1 {
            return Err(LouvainError::Ingestion {
                line: line_index + 1,
                reason: "node ids are 1-based and must be >= 1".to_string(),
            });
        }
        let (tail, head) = (tail - 1, head - 1);

        max_node = max_node.max(tail).max(head);
        let (tail, head) = (tail as NodeId, head as NodeId);
        if tail == head {
            edges.push((tail, head, weight));
        } else {
            edges.push((tail, head, weight));
            edges.push((head, tail, weight));
        }
    }

    let node_count = (max_node + 1) as NodeId;
    Ok((edges, node_count))
}

/// Reads a clustering file: one cluster id per line, line `i` giving
/// node `i`'s cluster id (`read_clustering` in the original source).
pub fn read_clustering(path: &Path, expected_nodes: NodeId) -> Result<Vec<ClusterId>, LouvainError> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut assignments = Vec::with_capacity(expected_nodes as usize);
    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        let cluster = trimmed.parse::<ClusterId>().map_err(|_| LouvainError::Ingestion {
            line: line_index + 1,
            reason: "cluster id is not a non-negative integer".to_string(),
        })?;
        assignments.push(cluster);
    }

    if assignments.len() as NodeId != expected_nodes {
        return Err(LouvainError::Ingestion {
            line: assignments.len() + 1,
            reason: format!(
                "clustering file has {} entries, graph has {expected_nodes} nodes",
                assignments.len()
            ),
        });
    }

    Ok(assignments)
}

/// Writes one cluster id per line, indexed by node id.
pub fn write_clustering(path: &Path, assignments: &[ClusterId]) -> Result<(), LouvainError> {
    let mut out = std::fs::File::create(path)?;
    for &cluster in assignments {
        writeln!(out, "{cluster}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn reads_a_triangle_with_default_weights() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2\n2 3\n1 3").unwrap();
        let (edges, node_count) = read_graph_txt(file.path()).unwrap();
        assert_eq!(node_count, 3);
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn reads_explicit_weights_and_self_loops() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2 5\n1 1 2").unwrap();
        let (edges, node_count) = read_graph_txt(file.path()).unwrap();
        assert_eq!(node_count, 2);
        assert!(edges.contains(&(0, 0, 2)));
        assert!(edges.contains(&(0, 1, 5)));
        assert!(edges.contains(&(1, 0, 5)));
    }

    #[test]
    fn rejects_malformed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 abc").unwrap();
        let err = read_graph_txt(file.path()).unwrap_err();
        assert!(matches!(err, LouvainError::Ingestion { .. }));
    }

    #[test]
    fn rejects_node_ids_below_one() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 1").unwrap();
        let err = read_graph_txt(file.path()).unwrap_err();
        assert!(matches!(err, LouvainError::Ingestion { .. }));
    }

    #[test]
    fn clustering_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clustering.txt");
        write_clustering(&path, &[0, 0, 1, 1]).unwrap();
        let read_back = read_clustering(&path, 4).unwrap();
        assert_eq!(read_back, vec![0, 0, 1, 1]);
    }

    #[test]
    fn clustering_length_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clustering.txt");
        write_clustering(&path, &[0, 1]).unwrap();
        let err = read_clustering(&path, 3).unwrap_err();
        assert!(matches!(err, LouvainError::Ingestion { .. }));
    }
}
