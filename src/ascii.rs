//! ASCII rendering module for hex grids
//!
//! Draws a hexagonal window of the grid as text, one row per `r`, with each
//! row shifted half a cell so neighbors line up the way they do on screen.

use std::collections::BTreeMap;

use crate::fog::FogState;
use crate::grid::HexGrid;
use crate::hex::Axial;
use crate::terrain::TerrainKind;

/// Glyph for unexplored cells.
pub const UNEXPLORED_CHAR: char = '?';
/// Glyph for the player position.
pub const PLAYER_CHAR: char = '@';
/// Glyph for coordinates inside the window but outside the grid.
pub const VOID_CHAR: char = ' ';

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AsciiMode {
    /// Terrain glyphs, unexplored cells hidden
    #[default]
    Explored,
    /// Terrain glyphs for every cell
    Terrain,
    /// Fog state only
    Fog,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Explored => "Explored",
            AsciiMode::Terrain => "Terrain",
            AsciiMode::Fog => "Fog",
        }
    }
}

/// Get ASCII character for a fog state
pub fn fog_char(state: FogState) -> char {
    match state {
        FogState::Hidden => '#',
        FogState::Explored => ',',
        FogState::Visible => '.',
    }
}

/// Render every cell within `rings` of `center`.
///
/// Rows run from north to south. Column `2 * dq + dr` keeps each row offset
/// by half a cell from the one above it.
pub fn render_window(grid: &HexGrid, center: Axial, rings: u32, player: Option<Axial>, mode: AsciiMode) -> String {
    let rings = rings as i32;
    let width = (4 * rings + 1) as usize;
    let mut result = String::with_capacity((width + 1) * (2 * rings + 1) as usize);

    for dr in -rings..=rings {
        let mut row = vec![VOID_CHAR; width];
        for dq in -rings..=rings {
            let offset = Axial::new(dq, dr);
            if offset.ring() > rings {
                continue;
            }
            let coord = center + offset;
            let col = (2 * dq + dr + 2 * rings) as usize;
            row[col] = if player == Some(coord) {
                PLAYER_CHAR
            } else {
                cell_char(grid, coord, mode)
            };
        }
        let line: String = row.into_iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }

    result
}

fn cell_char(grid: &HexGrid, coord: Axial, mode: AsciiMode) -> char {
    let Some(cell) = grid.get(coord) else {
        return VOID_CHAR;
    };
    match mode {
        AsciiMode::Terrain => cell.terrain().glyph(),
        AsciiMode::Explored if cell.is_explored() => cell.terrain().glyph(),
        AsciiMode::Explored => UNEXPLORED_CHAR,
        AsciiMode::Fog => fog_char(cell.fog_state()),
    }
}

/// Legend of terrain glyphs
pub fn terrain_legend() -> String {
    let mut legend = String::from("Legend:\n");
    for kind in TerrainKind::ALL {
        legend.push_str(&format!("  {}  {}\n", kind.glyph(), kind.display_name()));
    }
    legend.push_str(&format!("  {}  Unexplored\n", UNEXPLORED_CHAR));
    legend.push_str(&format!("  {}  You\n", PLAYER_CHAR));
    legend
}

/// Terrain census as an aligned table, largest share first.
pub fn census_table(census: &BTreeMap<TerrainKind, usize>) -> String {
    let total: usize = census.values().sum();
    let mut rows: Vec<_> = census.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

    let mut table = String::new();
    for (kind, count) in rows {
        let pct = if total > 0 {
            100.0 * *count as f64 / total as f64
        } else {
            0.0
        };
        table.push_str(&format!("  {:<10} {:>7}  {:>5.1}%\n", kind.display_name(), count, pct));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fog;

    #[test]
    fn test_window_shape() {
        let grid = HexGrid::from_fn(3, 10.0, |_| TerrainKind::Grass).unwrap();
        let text = render_window(&grid, Axial::ORIGIN, 2, None, AsciiMode::Terrain);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        let glyphs: usize = lines.iter().map(|l| l.chars().filter(|c| !c.is_whitespace()).count()).sum();
        assert_eq!(glyphs, 19);
        // Middle row is the full width, centered on the player column
        assert_eq!(lines[2].chars().count(), 9);
    }

    #[test]
    fn test_hidden_cells_and_player() {
        let mut grid = HexGrid::from_fn(3, 10.0, |_| TerrainKind::Desert).unwrap();
        fog::reveal(&mut grid, Axial::ORIGIN, 1);
        let text = render_window(&grid, Axial::ORIGIN, 2, Some(Axial::ORIGIN), AsciiMode::Explored);
        let all: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(all.matches(PLAYER_CHAR).count(), 1);
        assert_eq!(all.matches(TerrainKind::Desert.glyph()).count(), 6);
        assert_eq!(all.matches(UNEXPLORED_CHAR).count(), 12);
    }

    #[test]
    fn test_window_past_grid_edge_is_void() {
        let grid = HexGrid::from_fn(0, 10.0, |_| TerrainKind::Town).unwrap();
        let text = render_window(&grid, Axial::ORIGIN, 1, None, AsciiMode::Fog);
        let all: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(all, "#");
    }

    #[test]
    fn test_census_table_lists_every_kind() {
        let grid = HexGrid::from_fn(2, 10.0, |c| {
            if c.q > 0 {
                TerrainKind::Hills
            } else {
                TerrainKind::Swamp
            }
        })
        .unwrap();
        let table = census_table(&grid.census());
        assert!(table.contains("Hills"));
        assert!(table.contains("Swamp"));
        assert!(table.lines().next().unwrap().contains("Swamp"));
    }

    #[test]
    fn test_legend_covers_all_terrain() {
        let legend = terrain_legend();
        for kind in TerrainKind::ALL {
            assert!(legend.contains(kind.display_name()));
        }
    }
}
