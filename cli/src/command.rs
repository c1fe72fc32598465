use anyhow::{Context, Result, bail};
use sapper_core::Coord2;

pub const HELP: &str = "\
USAGE:
    r, reveal ROW COL   Reveal a cell
    f, flag ROW COL     Flag or unflag a cell
    c, chord ROW COL    Reveal around a number whose mines are all flagged
    n, new              Start a new game with the same settings
    s, save             Print a JSON snapshot of the board
    h, help             Print this help
    q, quit             Leave the game";

/// A single line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    New,
    Save,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line, `None` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "c" | "chord" => Self::Chord(parse_coords(&mut words)?),
            "n" | "new" => Self::New,
            "s" | "save" => Self::Save,
            "h" | "help" => Self::Help,
            "q" | "quit" => Self::Quit,
            _ => bail!("unknown command {name:?}, try \"help\""),
        };

        if words.next().is_some() {
            bail!("too many arguments for {name:?}");
        }
        Ok(Some(command))
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let row = words.next().context("missing row")?;
    let col = words.next().context("missing column")?;
    let row = row.parse().with_context(|| format!("invalid row {row:?}"))?;
    let col = col.parse().with_context(|| format!("invalid column {col:?}"))?;
    Ok((row, col))
}
