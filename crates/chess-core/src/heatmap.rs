//! Destination-square counts over decoded moves.

use std::fmt;

use crate::notation::Piece;
use crate::record::MoveRecord;

/// Which records count toward a heat map. `None` means no restriction.
#[derive(Debug, Clone, Default)]
pub struct HeatmapFilter {
    pub white: Option<bool>,
    pub pieces: Option<Vec<Piece>>,
    /// Keep only the first N matching records.
    pub limit: Option<usize>,
}

impl HeatmapFilter {
    pub fn matches(&self, record: &MoveRecord) -> bool {
        if let Some(white) = self.white {
            if record.white != white {
                return false;
            }
        }
        match &self.pieces {
            Some(pieces) => pieces.contains(&record.piece),
            None => true,
        }
    }
}

/// Counts indexed `[file][rank]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heatmap {
    counts: [[u64; 8]; 8],
}

impl Heatmap {
    pub fn from_records<'a, I>(records: I, filter: &HeatmapFilter) -> Self
    where
        I: IntoIterator<Item = &'a MoveRecord>,
    {
        let mut map = Heatmap::default();
        let matching = records.into_iter().filter(|r| filter.matches(r));

        for record in matching.take(filter.limit.unwrap_or(usize::MAX)) {
            map.add(record);
        }
        map
    }

    pub fn add(&mut self, record: &MoveRecord) {
        if let Some(cell) = self
            .counts
            .get_mut(record.file as usize)
            .and_then(|column| column.get_mut(record.rank as usize))
        {
            *cell += 1;
        }
    }

    pub fn count(&self, file: u8, rank: u8) -> u64 {
        self.counts
            .get(file as usize)
            .and_then(|column| column.get(rank as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn max(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for Heatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.max().to_string().len();

        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                write!(f, " {:>width$}", self.count(file, rank))?;
            }
            writeln!(f)?;
        }

        write!(f, "  ")?;
        for letter in 'a'..='h' {
            write!(f, " {letter:>width$}")?;
        }
        writeln!(f)
    }
}
