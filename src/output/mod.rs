use colored::Colorize;
use serde::Serialize;

use crate::board::{Board, LoadState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, Serialize)]
pub struct TileRecord {
    pub id: u64,
    pub title: String,
    pub interaction_count: u32,
    pub display_color: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct PanelRecord {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct GridSnapshot {
    pub status: String,
    pub error: Option<String>,
    pub visible: Vec<TileRecord>,
    pub remainder: usize,
    pub panel_open: bool,
    pub panel: Option<PanelRecord>,
}

pub fn build_snapshot(board: &Board) -> GridSnapshot {
    let (status, error) = match board.load_state() {
        LoadState::Pending => ("pending".to_string(), None),
        LoadState::Ready => ("ready".to_string(), None),
        LoadState::Failed(e) => ("failed".to_string(), Some(e.clone())),
    };
    let selected = board.selected();
    let visible = board
        .visible()
        .iter()
        .map(|r| TileRecord {
            id: r.id,
            title: r.title.clone(),
            interaction_count: r.interaction_count,
            display_color: r.display_color.to_string(),
            selected: selected == Some(r.id),
        })
        .collect();
    let panel = if board.panel_open() {
        board.selected_record().map(|r| PanelRecord {
            id: r.id,
            title: r.title.clone(),
            body: r.body.clone(),
        })
    } else {
        None
    };
    GridSnapshot {
        status,
        error,
        visible,
        remainder: board.remainder_len(),
        panel_open: board.panel_open(),
        panel,
    }
}

fn hex_components(hex: &str) -> Option<(u8, u8, u8)> {
    let raw = hex.strip_prefix('#')?;
    if raw.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&raw[0..2], 16).ok()?;
    let g = u8::from_str_radix(&raw[2..4], 16).ok()?;
    let b = u8::from_str_radix(&raw[4..6], 16).ok()?;
    Some((r, g, b))
}

fn swatch(color: &str, no_color: bool) -> String {
    if no_color {
        return color.to_string();
    }
    match hex_components(color) {
        Some((r, g, b)) => format!("{}", color.truecolor(r, g, b)),
        None => color.to_string(),
    }
}

pub fn render_text(snapshot: &GridSnapshot, no_color: bool) -> Vec<u8> {
    let mut out = String::new();
    if let Some(error) = snapshot.error.as_deref() {
        out.push_str(&format!(":: Failed    : {error}\n"));
        return out.into_bytes();
    }
    for tile in &snapshot.visible {
        let marker = if tile.selected { ">" } else { " " };
        out.push_str(&format!(
            "{} #{:<4} {:<9} clicks={:<3} {}\n",
            marker,
            tile.id,
            swatch(&tile.display_color, no_color),
            tile.interaction_count,
            tile.title
        ));
    }
    out.push_str(&format!(":: Remaining : {}\n", snapshot.remainder));
    if let Some(panel) = snapshot.panel.as_ref() {
        out.push_str(&format!(":: Panel     : #{} {}\n", panel.id, panel.title));
        out.push_str(&format!("   {}\n", panel.body.replace('\n', "\n   ")));
    }
    out.into_bytes()
}

pub fn render_json(snapshot: &GridSnapshot) -> Vec<u8> {
    serde_json::to_vec_pretty(snapshot).unwrap_or_else(|_| b"{}\n".to_vec())
}
