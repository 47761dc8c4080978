// File: src/heatmap.rs
//! Province tally and the bubble map drawn from it.
//!
//! The tally always covers the full catalog, never the filtered view: the
//! map is a legend of where events happen, not a second result list.

use crate::model::Event;
use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

/// Map coordinates in percent of the drawing area (x from the left, y from the top).
pub const PROVINCE_POSITIONS: [(&str, u8, u8); 32] = [
    ("黑龙江", 82, 15),
    ("吉林", 80, 24),
    ("辽宁", 78, 31),
    ("内蒙古", 55, 22),
    ("北京", 71, 35),
    ("天津", 74, 38),
    ("河北", 70, 40),
    ("山东", 75, 48),
    ("江苏", 79, 58),
    ("上海", 84, 62),
    ("浙江", 80, 68),
    ("福建", 77, 78),
    ("广东", 70, 86),
    ("海南", 64, 95),
    ("广西", 60, 85),
    ("云南", 48, 85),
    ("贵州", 55, 80),
    ("四川", 48, 72),
    ("重庆", 56, 71),
    ("湖南", 63, 76),
    ("湖北", 65, 68),
    ("江西", 71, 75),
    ("安徽", 74, 66),
    ("河南", 68, 60),
    ("山西", 65, 50),
    ("陕西", 60, 60),
    ("宁夏", 58, 50),
    ("甘肃", 50, 52),
    ("青海", 40, 55),
    ("新疆", 23, 35),
    ("西藏", 30, 75),
    ("新疆兵团", 28, 45),
];

pub fn tally(events: &[Event]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for event in events {
        *counts.entry(event.province.clone()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BubbleSize {
    Small,
    Medium,
    Large,
    Huge,
}

impl BubbleSize {
    pub fn for_count(count: usize) -> Self {
        match count {
            0..=9 => BubbleSize::Small,
            10..=19 => BubbleSize::Medium,
            20..=29 => BubbleSize::Large,
            _ => BubbleSize::Huge,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            BubbleSize::Small => '·',
            BubbleSize::Medium => '•',
            BubbleSize::Large => '●',
            BubbleSize::Huge => '◉',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatLevel {
    /// No events yet.
    Empty,
    Regular,
    Dense,
}

impl HeatLevel {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => HeatLevel::Empty,
            1..=14 => HeatLevel::Regular,
            _ => HeatLevel::Dense,
        }
    }

    pub fn legend(&self) -> &'static str {
        match self {
            HeatLevel::Empty => "待入",
            HeatLevel::Regular => "常规",
            HeatLevel::Dense => "密集",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub province: &'static str,
    pub count: usize,
    pub col: usize,
    pub row: usize,
    pub size: BubbleSize,
    pub level: HeatLevel,
    pub selected: bool,
    /// False when the label collided with something already drawn.
    pub labelled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Glyph(char),
    /// Index into `placements`.
    Bubble(usize),
    /// Right half of a double-width glyph.
    Continuation,
}

/// A run of one grid row, as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'g> {
    Text(String),
    Bubble(&'g Placement),
}

/// Character-cell rendition of the bubble map. Every entry of `placements`
/// owns exactly one bubble cell; a province is absent only when the grid has
/// fewer free cells than there are provinces.
#[derive(Debug, Clone)]
pub struct HeatGrid {
    pub width: usize,
    pub height: usize,
    pub placements: Vec<Placement>,
    cells: Vec<Vec<Cell>>,
}

impl HeatGrid {
    pub fn layout(
        counts: &HashMap<String, usize>,
        width: usize,
        height: usize,
        selected: Option<&str>,
    ) -> Self {
        let mut grid = Self {
            width,
            height,
            placements: Vec::new(),
            cells: vec![vec![Cell::Empty; width]; height],
        };
        if width == 0 || height == 0 {
            return grid;
        }

        // Bubbles first so no label can hide one. Two provinces that round to
        // the same cell are kept apart by moving the later one.
        for (name, x, y) in PROVINCE_POSITIONS {
            let count = counts.get(name).copied().unwrap_or(0);
            let home_col = (x as usize * (width - 1)) / 100;
            let home_row = (y as usize * (height - 1)) / 100;
            let Some((row, col)) = grid.free_cell_near(home_row, home_col) else {
                log::debug!("No room for {} on a {}x{} heatmap", name, width, height);
                continue;
            };
            let size = BubbleSize::for_count(count);
            grid.cells[row][col] = Cell::Bubble(grid.placements.len());
            grid.placements.push(Placement {
                province: name,
                count,
                col,
                row,
                size,
                level: HeatLevel::for_count(count),
                selected: selected == Some(name),
                labelled: false,
            });
        }

        for i in 0..grid.placements.len() {
            let (name, col, row) = {
                let p = &grid.placements[i];
                (p.province, p.col, p.row)
            };
            if grid.try_write(row, col + 1, name) {
                grid.placements[i].labelled = true;
            }
        }
        grid
    }

    /// Nearest empty cell to `(row, col)`, searched ring by ring. Within a
    /// ring, straight neighbours win over diagonals and same-row cells over
    /// same-column ones.
    fn free_cell_near(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        if self.cells[row][col] == Cell::Empty {
            return Some((row, col));
        }
        let reach = self.width.max(self.height) as isize;
        for r in 1..=reach {
            let mut best: Option<((isize, isize), (usize, usize))> = None;
            for dr in -r..=r {
                for dc in -r..=r {
                    if dr.abs().max(dc.abs()) != r {
                        continue;
                    }
                    let (Some(y), Some(x)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
                    else {
                        continue;
                    };
                    if y >= self.height || x >= self.width || self.cells[y][x] != Cell::Empty {
                        continue;
                    }
                    let rank = (dr.abs() + dc.abs(), dr.abs());
                    if best.is_none_or(|(b, _)| rank < b) {
                        best = Some((rank, (y, x)));
                    }
                }
            }
            if let Some((_, at)) = best {
                return Some(at);
            }
        }
        None
    }

    /// Writes `text` starting at `col` if every cell it needs is free.
    fn try_write(&mut self, row: usize, col: usize, text: &str) -> bool {
        let needed: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
        if col + needed > self.width {
            return false;
        }
        if self.cells[row][col..col + needed]
            .iter()
            .any(|c| *c != Cell::Empty)
        {
            return false;
        }
        let mut at = col;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            self.cells[row][at] = Cell::Glyph(c);
            if w == 2 {
                self.cells[row][at + 1] = Cell::Continuation;
            }
            at += w;
        }
        true
    }

    pub fn lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|c| match c {
                        Cell::Empty => Some(' '),
                        Cell::Glyph(g) => Some(*g),
                        Cell::Bubble(i) => Some(self.placements[*i].size.glyph()),
                        Cell::Continuation => None,
                    })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    /// Splits a row into plain text runs and bubbles.
    pub fn segments(&self, row: usize) -> Vec<Segment<'_>> {
        let mut out = Vec::new();
        let mut text = String::new();
        let Some(cells) = self.cells.get(row) else {
            return out;
        };
        for cell in cells {
            match cell {
                Cell::Empty => text.push(' '),
                Cell::Glyph(g) => text.push(*g),
                Cell::Continuation => {}
                Cell::Bubble(i) => {
                    if !text.is_empty() {
                        out.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    out.push(Segment::Bubble(&self.placements[*i]));
                }
            }
        }
        if !text.trim_end().is_empty() {
            out.push(Segment::Text(text));
        }
        out
    }

    pub fn placement(&self, province: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.province == province)
    }
}
