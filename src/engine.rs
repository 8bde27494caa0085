use chrono::{DateTime, Utc};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Score decay per elapsed second.
const TIME_MULTIPLIER: f64 = 2.0;
/// A win never scores below this fraction of the base score.
const MIN_SCORE_FRACTION: f64 = 0.1;

/// One Minesweeper game from start to finish.
///
/// This is the complete serializable session snapshot: the persistence layer
/// stores and reloads it verbatim between moves, and every mutation goes
/// through [`apply_move`](Self::apply_move). The session knows nothing about
/// HTTP, storage, or identity.
///
/// The reveal mask only ever flips `false -> true`; flags toggle freely on
/// unrevealed cells. The generation seed is kept so the safe-first-move
/// regeneration stays deterministic across a snapshot reload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    moves: Vec<MoveRecord>,
    difficulty: Difficulty,
    base_score: u32,
    status: GameStatus,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    first_move_taken: bool,
    seed: u64,
    revealed_count: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Starts a new game. Unrecognized difficulty names fall back to `easy`;
    /// explicit `custom` dimensions fully override the preset.
    pub fn new(difficulty: &str, custom: Option<GameConfig>) -> Self {
        Self::with_seed(difficulty, custom, rand::rng().random())
    }

    /// Starts a new game with a fixed generation seed, so the resulting
    /// board (and any safe-first-move regeneration) is reproducible.
    pub fn with_seed(difficulty: &str, custom: Option<GameConfig>, seed: u64) -> Self {
        let difficulty = Difficulty::from_name(difficulty).unwrap_or_default();
        let (config, base_score) = match custom {
            Some(dims) => {
                let config = GameConfig::new(dims.rows, dims.cols, dims.mines);
                (config, custom_base_score(config, difficulty))
            }
            None => (difficulty.config(), difficulty.preset().base_score),
        };

        let board = BoardGenerator::new(seed, SafeZone::Anywhere).generate(config);
        let dim = (board.rows() as usize, board.cols() as usize);
        log::debug!(
            "new {} game: {}x{} with {} mines",
            difficulty.name(),
            board.rows(),
            board.cols(),
            board.mine_count()
        );

        Self {
            board,
            revealed: Array2::default(dim),
            flagged: Array2::default(dim),
            moves: Vec::new(),
            difficulty,
            base_score,
            status: GameStatus::Active,
            started_at: Utc::now(),
            completed_at: None,
            first_move_taken: false,
            seed,
            revealed_count: 0,
            flagged_count: 0,
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn base_score(&self) -> u32 {
        self.base_score
    }

    pub fn rows(&self) -> Coord {
        self.board.rows()
    }

    pub fn cols(&self) -> Coord {
        self.board.cols()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Total mines minus placed flags, may go negative on overflagging.
    pub fn mines_left(&self) -> isize {
        self.board.mine_count() as isize - self.flagged_count as isize
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// The mine that ended the game, if it ended by detonation.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Fractional seconds since the game started, frozen once it completed.
    pub fn elapsed_secs(&self) -> f64 {
        let end = self.completed_at.unwrap_or_else(Utc::now);
        ((end - self.started_at).num_milliseconds() as f64 / 1000.0).max(0.0)
    }

    pub fn is_revealed(&self, (row, col): Coord2) -> bool {
        self.revealed[(row as usize, col as usize)]
    }

    pub fn is_flagged(&self, (row, col): Coord2) -> bool {
        self.flagged[(row as usize, col as usize)]
    }

    /// Applies a move named by its wire string, rejecting unknown names.
    pub fn apply_named_move(&mut self, row: Coord, col: Coord, action: &str) -> MoveResult {
        match action.parse::<MoveAction>() {
            Ok(action) => self.apply_move(row, col, action),
            Err(rejection) => {
                // status and bounds outrank an unrecognized action name
                if !self.status.is_active() {
                    self.reject(MoveRejection::SessionFinished)
                } else if !self.board.in_bounds(row, col) {
                    self.reject(MoveRejection::OutOfBounds)
                } else {
                    self.reject(rejection)
                }
            }
        }
    }

    /// Applies one move, mutating the session in place. Never panics and
    /// never throws: every rejected move comes back as `valid: false` with
    /// the session untouched.
    pub fn apply_move(&mut self, row: Coord, col: Coord, action: MoveAction) -> MoveResult {
        if let Err(rejection) = self.validate_move(row, col, action) {
            return self.reject(rejection);
        }

        match action {
            MoveAction::Reveal => self.apply_reveal((row, col)),
            MoveAction::Flag => self.apply_flag((row, col)),
            MoveAction::Chord => self.apply_chord((row, col)),
        }
    }

    /// Masked projection for active play: hidden cells are opaque, flags are
    /// distinct, only revealed cells expose their value.
    pub fn client_view(&self) -> Vec<Vec<CellView>> {
        (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| {
                        let coords = (row, col);
                        if self.is_revealed(coords) {
                            CellView::Revealed(self.board.value_at(coords))
                        } else if self.is_flagged(coords) {
                            CellView::Flagged
                        } else {
                            CellView::Hidden
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Unmasked board, the appropriate projection once the game is over.
    pub fn full_view(&self) -> Vec<Vec<CellValue>> {
        self.board.to_rows()
    }

    fn validate_move(
        &self,
        row: Coord,
        col: Coord,
        action: MoveAction,
    ) -> core::result::Result<(), MoveRejection> {
        if !self.status.is_active() {
            return Err(MoveRejection::SessionFinished);
        }
        if !self.board.in_bounds(row, col) {
            return Err(MoveRejection::OutOfBounds);
        }

        let coords = (row, col);
        match action {
            MoveAction::Reveal => {
                if self.is_revealed(coords) {
                    return Err(MoveRejection::AlreadyRevealed);
                }
                if self.is_flagged(coords) {
                    return Err(MoveRejection::RevealFlagged);
                }
            }
            MoveAction::Flag => {
                if self.is_revealed(coords) {
                    return Err(MoveRejection::FlagRevealed);
                }
            }
            MoveAction::Chord => {
                if !self.is_revealed(coords) {
                    return Err(MoveRejection::ChordUnrevealed);
                }
                let number = self.board.value_at(coords);
                if number <= 0 {
                    return Err(MoveRejection::ChordWithoutNumber);
                }
                let placed = self.count_flagged_neighbors(coords);
                if placed != number as u8 {
                    return Err(MoveRejection::ChordFlagMismatch {
                        needed: number as u8,
                        placed,
                    });
                }
            }
        }
        Ok(())
    }

    fn apply_reveal(&mut self, coords: Coord2) -> MoveResult {
        self.record_move(coords, LoggedAction::Reveal);

        if !self.first_move_taken {
            self.ensure_safe_first_move(coords);
        }

        if self.board.is_mine(coords) {
            self.triggered_mine = Some(coords);
            self.finish(GameStatus::Lost);
            let mut result = MoveResult::accepted(self.status, "Game over - you hit a mine!");
            result.board = Some(self.full_view());
            return result;
        }

        self.flood_reveal(coords);

        if self.all_safe_revealed() {
            self.finish_won()
        } else {
            MoveResult::accepted(self.status, "Cell revealed")
        }
    }

    fn apply_flag(&mut self, coords: Coord2) -> MoveResult {
        let placing = !self.is_flagged(coords);
        self.record_move(
            coords,
            if placing {
                LoggedAction::Flag
            } else {
                LoggedAction::Unflag
            },
        );

        self.flagged[(coords.0 as usize, coords.1 as usize)] = placing;
        if placing {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }

        let message = if placing {
            format!("Flag placed at position ({}, {})", coords.0, coords.1)
        } else {
            format!("Flag removed from position ({}, {})", coords.0, coords.1)
        };
        MoveResult::accepted(self.status, message)
    }

    fn apply_chord(&mut self, coords: Coord2) -> MoveResult {
        self.record_move(coords, LoggedAction::Chord);

        let targets: Vec<Coord2> = self
            .board
            .neighbors(coords)
            .filter(|&pos| !self.is_revealed(pos) && !self.is_flagged(pos))
            .collect();

        let mut hit_mine = false;
        for pos in targets {
            if self.is_revealed(pos) {
                // opened by an earlier target's cascade
                continue;
            }
            if self.board.is_mine(pos) {
                // a wrong flag let the chord detonate; show the mine as
                // revealed so the client can paint the blast
                self.revealed[(pos.0 as usize, pos.1 as usize)] = true;
                self.triggered_mine = Some(pos);
                hit_mine = true;
            } else {
                self.flood_reveal(pos);
            }
        }

        if hit_mine {
            self.finish(GameStatus::Lost);
            let mut result = MoveResult::accepted(self.status, "Game over - chord hit a mine!");
            result.board = Some(self.full_view());
            return result;
        }

        if self.all_safe_revealed() {
            self.finish_won()
        } else {
            MoveResult::accepted(self.status, "Chord revealed adjacent cells")
        }
    }

    /// Regenerates the board when the first reveal would hit a mine or a
    /// numbered cell, excluding the 3x3 neighborhood of the chosen cell so
    /// the opening always cascades. Runs at most once per session.
    fn ensure_safe_first_move(&mut self, coords: Coord2) {
        if self.board.value_at(coords) != 0 {
            log::debug!("regenerating board: first reveal at {coords:?} is not an opening");
            let config = GameConfig::new_unchecked(
                self.board.rows(),
                self.board.cols(),
                self.board.mine_count(),
            );
            self.board = BoardGenerator::new(
                self.seed.wrapping_add(1),
                SafeZone::Neighborhood(coords),
            )
            .generate(config);
        }
        self.first_move_taken = true;
    }

    /// Iterative flood-fill: reveal the cell, and when it has no adjacent
    /// mines keep expanding through unrevealed, unflagged neighbors. The
    /// cascade stops at numbered cells (revealed but not expanded) and skips
    /// flagged cells entirely. Must not be entered on a mine cell.
    fn flood_reveal(&mut self, coords: Coord2) {
        self.mark_revealed(coords);
        if self.board.value_at(coords) != 0 {
            return;
        }

        let mut visited = HashSet::from([coords]);
        let mut to_visit: VecDeque<Coord2> = self
            .board
            .neighbors(coords)
            .filter(|&pos| !self.is_revealed(pos) && !self.is_flagged(pos))
            .collect();

        while let Some(pos) = to_visit.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            if self.is_revealed(pos) || self.is_flagged(pos) {
                continue;
            }

            self.mark_revealed(pos);
            log::trace!("flood revealed {pos:?}, value {}", self.board.value_at(pos));

            if self.board.value_at(pos) == 0 {
                to_visit.extend(
                    self.board
                        .neighbors(pos)
                        .filter(|&p| !self.is_revealed(p) && !self.is_flagged(p))
                        .filter(|p| !visited.contains(p)),
                );
            }
        }
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        debug_assert!(!self.board.is_mine(coords));
        let cell = &mut self.revealed[(coords.0 as usize, coords.1 as usize)];
        if !*cell {
            *cell = true;
            self.revealed_count += 1;
        }
    }

    fn all_safe_revealed(&self) -> bool {
        self.revealed_count == self.board.safe_cell_count()
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.board
            .neighbors(coords)
            .filter(|&pos| self.is_flagged(pos))
            .count() as u8
    }

    fn record_move(&mut self, (row, col): Coord2, action: LoggedAction) {
        self.moves.push(MoveRecord {
            row,
            col,
            action,
            timestamp: Utc::now(),
        });
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.completed_at = Some(Utc::now());
        log::debug!("game finished as {status:?} after {} moves", self.moves.len());
    }

    fn finish_won(&mut self) -> MoveResult {
        self.finish(GameStatus::Won);
        let mut result = MoveResult::accepted(self.status, "Congratulations! You won!");
        result.score = Some(self.compute_score());
        result.board = Some(self.full_view());
        result
    }

    /// Time-decayed score, floored at 10% of the base score.
    fn compute_score(&self) -> u32 {
        let base = self.base_score as f64;
        let decayed = (base - self.elapsed_secs() * TIME_MULTIPLIER).floor();
        decayed.max(base * MIN_SCORE_FRACTION) as u32
    }

    fn reject(&self, rejection: MoveRejection) -> MoveResult {
        log::debug!("move rejected: {rejection}");
        MoveResult::rejected(self.status, rejection)
    }
}

/// Base score for boards with explicit dimensions, proportional to cell
/// count, mine density, and the requested tier's weight. Matches the preset
/// value for an easy-weighted 9x9 board with 10 mines.
fn custom_base_score(config: GameConfig, difficulty: Difficulty) -> u32 {
    let total = config.total_cells() as f64;
    let density = config.mines as f64 / total;
    (total * density * 100.0 * difficulty.score_weight()).round() as u32
}
