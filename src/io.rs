//! Flat-file readers and the benchmark CSV writer — the "external
//! collaborator" boundary named in spec.md §1 and §6. These depend on the
//! core (`SimilarityFunction`, `Pair`, `SearchResult`) but the core never
//! depends on them; callers are free to swap in their own IO layer.
//!
//! Format: UTF-8 text, newline-delimited. Lines whose first byte is `#` are
//! comments and are skipped. Data lines have exactly two whitespace-
//! separated fields, `<set-id> <token>` (or `<token> <set-id>` when
//! `reversed` is set). Duplicate `(set-id, token)` lines yield duplicate
//! tokens in the emitted set — this is a known pass-through behavior, not a
//! deduplication guarantee.

use std::io::{BufRead, BufReader, Read, Write};

use crate::error::{Result, SetSimError};

/// Read a flat file of `<set-id> <token>` lines (or the reversed field
/// order) that may interleave set-ids in any order; groups by set-id after
/// reading the whole file, sorting entries by set-id first.
pub fn read_flattened_raw_sets<R: Read>(
    reader: R,
    reversed: bool,
) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut entries = read_entries(reader, reversed)?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(group_entries(entries))
}

/// Read a flat file of `<set-id> <token>` lines that are already grouped
/// (sorted) by set-id. More efficient than [`read_flattened_raw_sets`]
/// because it never re-sorts, but produces incorrect grouping if the input
/// isn't actually sorted by set-id.
pub fn read_flattened_sorted_raw_sets<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let entries = read_entries(reader, false)?;
    Ok(group_entries(entries))
}

/// Read a flat file of `<set-id:int> <token:int>` lines, sorted by set-id,
/// already in the integer/transformed representation.
pub fn read_flattened_sorted_transformed_sets<R: Read>(
    reader: R,
) -> Result<(Vec<u32>, Vec<Vec<u32>>)> {
    let buf = BufReader::new(reader);
    let mut set_ids: Vec<u32> = Vec::new();
    let mut sets: Vec<Vec<u32>> = Vec::new();
    let mut current: Option<(u32, Vec<u32>)> = None;

    for (line_no, line) in buf.lines().enumerate() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(SetSimError::MalformedLine {
                line_no: line_no + 1,
                reason: format!("expected 2 whitespace-separated fields, got {}", fields.len()),
            });
        }
        let set_id: u32 = fields[0].parse().map_err(|_| SetSimError::MalformedLine {
            line_no: line_no + 1,
            reason: format!("set-id {:?} is not an integer", fields[0]),
        })?;
        let token: u32 = fields[1].parse().map_err(|_| SetSimError::MalformedLine {
            line_no: line_no + 1,
            reason: format!("token {:?} is not an integer", fields[1]),
        })?;

        match &mut current {
            Some((curr_id, curr_set)) if *curr_id == set_id => curr_set.push(token),
            Some((curr_id, curr_set)) => {
                set_ids.push(*curr_id);
                sets.push(std::mem::take(curr_set));
                *curr_id = set_id;
                curr_set.push(token);
            }
            None => current = Some((set_id, vec![token])),
        }
    }
    if let Some((curr_id, curr_set)) = current {
        set_ids.push(curr_id);
        sets.push(curr_set);
    }
    Ok((set_ids, sets))
}

/// gzip-framed variant of [`read_flattened_raw_sets`].
pub fn read_gzipped_flattened_raw_sets<R: Read>(
    reader: R,
    reversed: bool,
) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    read_flattened_raw_sets(flate2::read::GzDecoder::new(reader), reversed)
}

/// gzip-framed variant of [`read_flattened_sorted_raw_sets`].
pub fn read_gzipped_flattened_sorted_raw_sets<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    read_flattened_sorted_raw_sets(flate2::read::GzDecoder::new(reader))
}

/// gzip-framed variant of [`read_flattened_sorted_transformed_sets`].
pub fn read_gzipped_flattened_sorted_transformed_sets<R: Read>(
    reader: R,
) -> Result<(Vec<u32>, Vec<Vec<u32>>)> {
    read_flattened_sorted_transformed_sets(flate2::read::GzDecoder::new(reader))
}

/// Write `(x, y, similarity)` triples as a three-column CSV with the
/// similarity formatted to 4 fractional digits, matching the benchmark
/// output format named in spec.md §6.
pub fn write_pairs_csv<W: Write>(
    writer: W,
    pairs: impl Iterator<Item = crate::all_pairs::Pair>,
) -> Result<()> {
    let mut w = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    for pair in pairs {
        w.write_record(&[
            pair.x.to_string(),
            pair.y.to_string(),
            format!("{:.4}", pair.similarity),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn read_entries<R: Read>(reader: R, reversed: bool) -> Result<Vec<(String, String)>> {
    let buf = BufReader::new(reader);
    let mut entries = Vec::new();
    for (line_no, line) in buf.lines().enumerate() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(SetSimError::MalformedLine {
                line_no: line_no + 1,
                reason: format!("expected 2 whitespace-separated fields, got {}", fields.len()),
            });
        }
        let entry = if reversed {
            (fields[1].to_string(), fields[0].to_string())
        } else {
            (fields[0].to_string(), fields[1].to_string())
        };
        entries.push(entry);
    }
    Ok(entries)
}

fn group_entries(entries: Vec<(String, String)>) -> (Vec<String>, Vec<Vec<String>>) {
    let mut set_ids = Vec::new();
    let mut sets: Vec<Vec<String>> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for (set_id, token) in entries {
        match &mut current {
            Some((curr_id, curr_set)) if *curr_id == set_id => curr_set.push(token),
            Some((curr_id, curr_set)) => {
                set_ids.push(curr_id.clone());
                sets.push(std::mem::take(curr_set));
                *curr_id = set_id;
                curr_set.push(token);
            }
            None => current = Some((set_id, vec![token])),
        }
    }
    if let Some((curr_id, curr_set)) = current {
        set_ids.push(curr_id);
        sets.push(curr_set);
    }
    (set_ids, sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::all_pairs::Pair;

    #[test]
    fn e6_reversed_flat_file() {
        // spec.md E6 canonical test block.
        let input = "\
1 a
1 b
1 c
2 a
2 d
3 a
3 f
4 c
4 f
4 g
4 h";
        let (set_ids, sets) = read_flattened_raw_sets(input.as_bytes(), true).unwrap();
        assert_eq!(set_ids, vec!["a", "b", "c", "d", "f", "g", "h"]);

        let idx = |tok: &str| set_ids.iter().position(|t| t == tok).unwrap();
        assert_eq!(sets[idx("a")], vec!["1", "2", "3"]);
        assert_eq!(sets[idx("d")], vec!["1"]);
        assert_eq!(sets[idx("f")], vec!["3", "4"]);
    }

    #[test]
    fn comments_are_skipped() {
        let input = "# this is a comment\n1 a\n# another\n1 b\n";
        let (set_ids, sets) = read_flattened_raw_sets(input.as_bytes(), false).unwrap();
        assert_eq!(set_ids, vec!["1"]);
        assert_eq!(sets[0], vec!["a", "b"]);
    }

    #[test]
    fn malformed_line_rejected() {
        let input = "1 a b\n";
        let err = read_flattened_raw_sets(input.as_bytes(), false).unwrap_err();
        assert!(matches!(err, SetSimError::MalformedLine { .. }));
    }

    #[test]
    fn transformed_reader_parses_integers() {
        let input = "0 10\n0 11\n1 12\n";
        let (set_ids, sets) = read_flattened_sorted_transformed_sets(input.as_bytes()).unwrap();
        assert_eq!(set_ids, vec![0, 1]);
        assert_eq!(sets, vec![vec![10, 11], vec![12]]);
    }

    #[test]
    fn transformed_reader_rejects_non_integer_field() {
        let input = "0 not-a-number\n";
        let err = read_flattened_sorted_transformed_sets(input.as_bytes()).unwrap_err();
        assert!(matches!(err, SetSimError::MalformedLine { .. }));
    }

    #[test]
    fn sorted_reader_requires_grouped_input_but_does_not_validate_it() {
        // Interleaved set-ids produce wrong grouping with the "sorted" reader
        // — this documents the contract, it isn't asserting correctness.
        let input = "0 a\n1 b\n0 c\n";
        let (set_ids, sets) = read_flattened_sorted_raw_sets(input.as_bytes()).unwrap();
        assert_eq!(set_ids, vec!["0", "1", "0"]);
        assert_eq!(sets, vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn gzip_round_trip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write as _;

        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"1 a\n1 b\n2 c\n").unwrap();
        let compressed = enc.finish().unwrap();

        let (set_ids, sets) = read_gzipped_flattened_raw_sets(&compressed[..], false).unwrap();
        assert_eq!(set_ids, vec!["1", "2"]);
        assert_eq!(sets, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn gzip_sorted_raw_round_trip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write as _;

        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"1 a\n1 b\n2 c\n").unwrap();
        let compressed = enc.finish().unwrap();

        let (set_ids, sets) = read_gzipped_flattened_sorted_raw_sets(&compressed[..]).unwrap();
        assert_eq!(set_ids, vec!["1", "2"]);
        assert_eq!(sets, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn csv_writer_formats_four_decimal_places() {
        let pairs = vec![
            Pair { x: 2, y: 1, similarity: 0.5 },
            Pair { x: 3, y: 0, similarity: 1.0 / 3.0 },
        ];
        let mut buf = Vec::new();
        write_pairs_csv(&mut buf, pairs.into_iter()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "2,1,0.5000\n3,0,0.3333\n");
    }
}
