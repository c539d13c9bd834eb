//! Cells command - dump the canonical cell enumeration
//!
//! The generation order is a contract with the presentation layer, which
//! addresses cells positionally (index 0 is `(-6, 0, 6)` on the radius-7
//! board).

use anyhow::Result;
use clap::Args;

use hexoust_core::{Board, BOARD_RADIUS};

#[derive(Args)]
pub struct CellsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CellsArgs) -> Result<()> {
    let board = Board::new(BOARD_RADIUS);

    if args.json {
        #[derive(serde::Serialize)]
        struct JsonCell {
            index: usize,
            q: i8,
            r: i8,
            s: i8,
        }

        let cells: Vec<JsonCell> = board
            .cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let coord = cell.coord();
                JsonCell {
                    index,
                    q: coord.q,
                    r: coord.r,
                    s: coord.s,
                }
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&cells)?);
    } else {
        for (index, cell) in board.cells().iter().enumerate() {
            println!("{:3}  {}", index, cell.coord());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_seven_enumeration() {
        let board = Board::new(BOARD_RADIUS);
        assert_eq!(board.cells().len(), 127);
        assert_eq!(board.cells()[0].coord(), hexoust_core::Hex::new(-6, 0, 6));
    }
}
