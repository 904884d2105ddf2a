//! Declarative list of the datasets to load.
//!
//! Each entry names a table prefix, a source file relative to the data
//! directory, the primary-key columns, and any extra uniqueness
//! constraints. The runner iterates the list in order, loading each
//! table completely before the next.

use std::path::{Path, PathBuf};

/// A uniqueness constraint applied after its table is loaded.
#[derive(Debug, Clone, Copy)]
pub struct UniqueSpec {
    pub constraint: &'static str,
    pub columns: &'static [&'static str],
}

/// One dataset to load.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    /// Prepended to the source stem to form the target table name,
    /// distinguishing the two upstream datasets in one database.
    pub prefix: &'static str,
    /// Source file path relative to the data directory.
    pub source: &'static str,
    /// Primary-key columns in constraint order; empty means no key.
    pub primary_key: &'static [&'static str],
    /// Extra uniqueness constraints.
    pub uniques: &'static [UniqueSpec],
}

impl TableSpec {
    pub fn source_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.source)
    }

    pub fn primary_key(&self) -> Option<&'static [&'static str]> {
        (!self.primary_key.is_empty()).then_some(self.primary_key)
    }
}

/// Every table of both datasets, in load order.
pub const TABLES: &[TableSpec] = &[
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/people.csv",
        primary_key: &["player_id"],
        uniques: &[UniqueSpec {
            constraint: "retro_player_unique",
            columns: &["retro_id"],
        }],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/batting.csv",
        primary_key: &["player_id", "year_id", "stint"],
        uniques: &[],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/battingpost.csv",
        primary_key: &["player_id", "year_id", "round"],
        uniques: &[],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/pitching.csv",
        primary_key: &["player_id", "year_id", "stint"],
        uniques: &[],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/pitchingpost.csv",
        primary_key: &["player_id", "year_id", "round"],
        uniques: &[],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/fielding.csv",
        primary_key: &["player_id", "year_id", "stint", "pos"],
        uniques: &[],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/fieldingpost.csv",
        primary_key: &["player_id", "year_id", "round", "pos"],
        uniques: &[],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/parks.csv",
        primary_key: &["park_key"],
        uniques: &[],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/salaries.csv",
        primary_key: &["player_id", "year_id", "team_id"],
        uniques: &[],
    },
    TableSpec {
        prefix: "lahman_",
        source: "lahman/wrangled/teams.csv",
        primary_key: &["team_id", "year_id"],
        uniques: &[UniqueSpec {
            constraint: "retro_team_unique",
            columns: &["team_id_retro", "year_id"],
        }],
    },
    TableSpec {
        prefix: "retro_",
        source: "retrosheet/wrangled/batting.csv.gz",
        primary_key: &["player_id", "game_id"],
        uniques: &[],
    },
    TableSpec {
        prefix: "retro_",
        source: "retrosheet/wrangled/pitching.csv.gz",
        primary_key: &["player_id", "game_id"],
        uniques: &[],
    },
    TableSpec {
        prefix: "retro_",
        source: "retrosheet/wrangled/fielding.csv.gz",
        primary_key: &["player_id", "game_id", "pos"],
        uniques: &[],
    },
    TableSpec {
        prefix: "retro_",
        source: "retrosheet/wrangled/game.csv.gz",
        primary_key: &["game_id"],
        uniques: &[],
    },
    TableSpec {
        prefix: "retro_",
        source: "retrosheet/wrangled/team_game.csv.gz",
        primary_key: &["team_id", "game_id"],
        uniques: &[],
    },
];
