use std::collections::VecDeque;

use thiserror::Error;

use crate::record::Record;
use crate::source::FetchError;

pub const DEFAULT_INITIAL_PAGE_SIZE: usize = 6;
pub const DEFAULT_PAGE_INCREMENT: usize = 10;

#[derive(Clone, Copy, Debug)]
pub struct BoardConfig {
    pub initial_page_size: usize,
    pub page_increment: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            initial_page_size: DEFAULT_INITIAL_PAGE_SIZE,
            page_increment: DEFAULT_PAGE_INCREMENT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("record {id} is not on the visible grid")]
    NotVisible { id: u64 },
}

/// The grid state: a visible prefix of the fetched feed, the not-yet-revealed
/// remainder, and the detail-panel selection. Records only ever move from the
/// remainder to the visible set; together the two always hold exactly what
/// was ingested.
#[derive(Clone, Debug)]
pub struct Board {
    config: BoardConfig,
    visible: Vec<Record>,
    remainder: VecDeque<Record>,
    panel_open: bool,
    selected: Option<u64>,
    load: LoadState,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            visible: Vec::new(),
            remainder: VecDeque::new(),
            panel_open: false,
            selected: None,
            load: LoadState::Pending,
        }
    }

    /// Consumes the one-shot fetch result. On success the feed is split at
    /// `initial_page_size`; on failure the grid stays empty and the error is
    /// kept observable instead of crashing the session.
    pub fn ingest(&mut self, fetched: Result<Vec<Record>, FetchError>) {
        match fetched {
            Ok(mut records) => {
                let cut = records.len().min(self.config.initial_page_size);
                let rest = records.split_off(cut);
                self.visible = records;
                self.remainder = rest.into();
                self.load = LoadState::Ready;
            }
            Err(e) => {
                self.visible.clear();
                self.remainder.clear();
                self.load = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Moves up to `page_increment` records from the front of the remainder
    /// onto the end of the visible set. A no-op once the remainder is empty.
    /// Returns how many records were revealed.
    pub fn reveal_more(&mut self) -> usize {
        let take = self.remainder.len().min(self.config.page_increment);
        for _ in 0..take {
            if let Some(record) = self.remainder.pop_front() {
                self.visible.push(record);
            }
        }
        take
    }

    /// Records an interaction on a visible tile, re-ranks the visible set by
    /// interaction count (descending; the stable sort keeps the prior order
    /// among equal counts), and opens the detail panel on that record.
    pub fn select(&mut self, id: u64) -> Result<&Record, BoardError> {
        let idx = self
            .visible
            .iter()
            .position(|r| r.id == id)
            .ok_or(BoardError::NotVisible { id })?;
        self.visible[idx] = self.visible[idx].with_interaction();
        self.visible
            .sort_by(|a, b| b.interaction_count.cmp(&a.interaction_count));
        self.panel_open = true;
        self.selected = Some(id);
        self.visible
            .iter()
            .find(|r| r.id == id)
            .ok_or(BoardError::NotVisible { id })
    }

    /// Closes the detail panel and clears the selection.
    pub fn deselect(&mut self) {
        self.panel_open = false;
        self.selected = None;
    }

    pub fn visible(&self) -> &[Record] {
        &self.visible
    }

    pub fn remainder_len(&self) -> usize {
        self.remainder.len()
    }

    pub fn total_len(&self) -> usize {
        self.visible.len() + self.remainder.len()
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&Record> {
        let id = self.selected?;
        self.visible.iter().find(|r| r.id == id)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }
}
