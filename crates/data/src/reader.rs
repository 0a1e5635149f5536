//! CSV readers for the evolution, move catalog and learner datasets.
//!
//! Columns are looked up by header name, ignoring case, spaces and
//! underscores, so `SP_Cost` and `SP Cost` both resolve. Cells are trimmed of
//! whitespace and stray quotes. Rows whose key column is blank are dropped.

use crate::error::{DataError, Result};
use crate::types::{Learner, MoveInfo};
use evopath_graph::EvolutionRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const EVOLUTION_NAME: &str = "Digimon";
const EVOLUTION_TARGETS: &str = "Evolves To";

const MOVE_NAME: &str = "Move";
const MOVE_ELEMENT: &str = "Attribute";
const MOVE_KIND: &str = "Type";
const MOVE_SP_COST: &str = "SP_Cost";
const MOVE_POWER: &str = "Power";
const MOVE_INHERITABLE: &str = "Inheritable";

const LEARNER_MOVE: &str = "Move";
const LEARNER_ENTITY: &str = "Digimon";
const LEARNER_LEVEL: &str = "Level";

/// Read `Digimon,Evolves To` rows from a file
pub fn read_evolutions(path: &Path) -> Result<Vec<EvolutionRecord>> {
    evolutions_from_reader(open(path)?, &path.display().to_string())
}

/// Read `Move,Icon,Attribute,Type,SP_Cost,Power,Inheritable` rows from a file
pub fn read_moves(path: &Path) -> Result<Vec<MoveInfo>> {
    moves_from_reader(open(path)?, &path.display().to_string())
}

/// Read `Move,Digimon,Level` rows from a file
pub fn read_learners(path: &Path) -> Result<Vec<Learner>> {
    learners_from_reader(open(path)?, &path.display().to_string())
}

pub fn evolutions_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Vec<EvolutionRecord>> {
    let mut table = Table::new(reader, source_name)?;
    let name = table.require(EVOLUTION_NAME)?;
    let targets = table.require(EVOLUTION_TARGETS)?;

    table.rows(name, |row| EvolutionRecord::new(row.cell(name), row.cell(targets)))
}

pub fn moves_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Vec<MoveInfo>> {
    let mut table = Table::new(reader, source_name)?;
    let name = table.require(MOVE_NAME)?;
    let element = table.require(MOVE_ELEMENT)?;
    let kind = table.require(MOVE_KIND)?;
    let power = table.require(MOVE_POWER)?;
    let inheritable = table.require(MOVE_INHERITABLE)?;
    let sp_cost = table.optional(MOVE_SP_COST);

    table.rows(name, |row| MoveInfo {
        name: row.cell(name),
        element: row.cell(element),
        kind: row.cell(kind),
        sp_cost: sp_cost.and_then(|col| row.cell(col).parse().ok()),
        power: row.cell(power).parse().ok(),
        inheritable: row.cell(inheritable).eq_ignore_ascii_case("yes"),
    })
}

pub fn learners_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Vec<Learner>> {
    let mut table = Table::new(reader, source_name)?;
    let move_name = table.require(LEARNER_MOVE)?;
    let entity = table.require(LEARNER_ENTITY)?;
    let level = table.require(LEARNER_LEVEL)?;

    let learners = table.rows(move_name, |row| {
        Learner::new(row.cell(move_name), row.cell(entity), row.cell(level).parse().ok())
    })?;
    Ok(learners
        .into_iter()
        .filter(|learner| !learner.entity.is_empty())
        .collect())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| DataError::io(path, e))
}

fn normalize_header(header: &str) -> String {
    clean(header)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn clean(cell: &str) -> &str {
    cell.trim().trim_matches('"').trim()
}

struct Table<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    source_name: String,
}

struct Row<'a> {
    record: &'a csv::StringRecord,
}

impl Row<'_> {
    fn cell(&self, column: usize) -> String {
        self.record.get(column).map(clean).unwrap_or_default().to_string()
    }
}

impl<R: Read> Table<R> {
    fn new(reader: R, source_name: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| DataError::malformed(source_name, 1, e.to_string()))?
            .iter()
            .map(normalize_header)
            .collect();

        Ok(Self {
            reader,
            headers,
            source_name: source_name.to_string(),
        })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        let wanted = normalize_header(column);
        self.headers.iter().position(|h| *h == wanted)
    }

    fn require(&self, column: &str) -> Result<usize> {
        self.optional(column)
            .ok_or_else(|| DataError::missing_column(&self.source_name, column))
    }

    /// Decode every row with a non-blank `key` cell
    fn rows<T>(&mut self, key: usize, mut decode: impl FnMut(&Row<'_>) -> T) -> Result<Vec<T>> {
        let mut out = Vec::new();
        let mut skipped = 0usize;

        for (idx, result) in self.reader.records().enumerate() {
            // Header is line 1
            let line = idx as u64 + 2;
            let record = result.map_err(|e| {
                let row = e.position().map(|p| p.line()).unwrap_or(line);
                DataError::malformed(&self.source_name, row, e.to_string())
            })?;
            let row = Row { record: &record };
            if row.cell(key).is_empty() {
                skipped += 1;
                continue;
            }
            out.push(decode(&row));
        }

        log::debug!(
            "Read {} rows from {} ({} blank rows skipped)",
            out.len(),
            self.source_name,
            skipped
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_evolutions_trim_and_skip_blank_names() {
        let csv = "Digimon,Evolves To\n\
                   Agumon, Greymon;GeoGreymon \n\
                   ,Ghost\n\
                   \"Greymon\",None\n";

        let records = evolutions_from_reader(csv.as_bytes(), "evolutions.csv").unwrap();

        assert_eq!(
            records,
            vec![
                EvolutionRecord::new("Agumon", "Greymon;GeoGreymon"),
                EvolutionRecord::new("Greymon", "None"),
            ]
        );
    }

    #[test]
    fn test_header_lookup_ignores_case_and_separators() {
        let csv = "move,icon,ATTRIBUTE,type,SP Cost,power,inheritable\n\
                   Baby Flame,fire.png,Fire,Magical,3,65,Yes\n\
                   Pepper Breath,fire.png,Fire,Physical,x,n/a,no\n";

        let moves = moves_from_reader(csv.as_bytes(), "moves.csv").unwrap();

        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].sp_cost, Some(3));
        assert_eq!(moves[0].power_value(), 65);
        assert!(moves[0].inheritable);
        assert_eq!(moves[1].sp_cost, None);
        assert_eq!(moves[1].power_value(), 0);
        assert!(!moves[1].inheritable);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let csv = "Move,Digimon\nBaby Flame,Agumon\n";

        let err = learners_from_reader(csv.as_bytes(), "learners.csv").unwrap_err();

        match err {
            DataError::MissingColumn {
                source_name,
                column,
            } => {
                assert_eq!(source_name, "learners.csv");
                assert_eq!(column, "Level");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_learners_need_move_and_entity() {
        let csv = "Move,Digimon,Level\n\
                   Baby Flame,Agumon,1\n\
                   Baby Flame,,4\n\
                   ,Gabumon,2\n\
                   Spit Fire,Guilmon,?\n";

        let learners = learners_from_reader(csv.as_bytes(), "learners.csv").unwrap();

        assert_eq!(
            learners,
            vec![
                Learner::new("Baby Flame", "Agumon", Some(1)),
                Learner::new("Spit Fire", "Guilmon", None),
            ]
        );
    }

    #[test]
    fn test_missing_file_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        let err = read_evolutions(&path).unwrap_err();

        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn test_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evolutions.csv");
        std::fs::write(&path, "Digimon,Evolves To\nAgumon,Greymon\n").unwrap();

        let records = read_evolutions(&path).unwrap();

        assert_eq!(records, vec![EvolutionRecord::new("Agumon", "Greymon")]);
    }
}
