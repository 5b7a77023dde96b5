use super::{Grid, Tile};

const DEFAULT_LEVEL: &str = "\
####################################
#                    K             #
#                                  #
#                                  #
#                                  #
#                                  #
#                                  #
#                                  #
#                                  #
#                                  #
#                                  #
#                                  #
#                                  #
#                                  #
#     @                         S  #
####################################";

impl Grid {
    /// Parse level text, one row per line. Short rows are right-padded with
    /// empty tiles. Returns `None` if the text holds no tiles at all.
    pub fn parse(text: &str) -> Option<Self> {
        let rows: Vec<Vec<Tile>> = text
            .lines()
            .map(|line| line.chars().map(Tile::from_symbol).collect())
            .collect();

        let width = rows.iter().map(Vec::len).max()?;
        if width == 0 {
            return None;
        }

        let tiles = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Tile::Empty);
                row
            })
            .collect();
        Some(Grid::new(tiles))
    }

    /// Built-in level used whenever a requested level cannot be found.
    pub fn default_level() -> Self {
        Self::parse(DEFAULT_LEVEL).expect("default level is not empty")
    }

    pub fn to_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.height);
        for row in &self.tiles {
            lines.push(row.iter().map(|tile| tile.symbol()).collect::<String>());
        }
        lines.join("\n")
    }
}
