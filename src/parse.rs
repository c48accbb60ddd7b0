use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::{Board, InvalidInput, MAX_DIMENSION, MIN_DIMENSION};

impl FromStr for Board {
    type Err = anyhow::Error;

    /// Parses `n` followed by `n * n` row-major tiles. Lines starting with `#` are comments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.starts_with('#'))
            .flat_map(|line| line.split_whitespace());

        let n = tokens.next().context("Missing dimension")?;
        let n = n
            .parse::<usize>()
            .with_context(|| format!("Invalid dimension: {n:?}"))?;
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&n) {
            return Err(InvalidInput::DimensionOutOfRange(n).into());
        }

        let mut tiles = Vec::with_capacity(n * n);
        for (tok, i) in tokens.by_ref().take(n * n).zip(1..) {
            let tile = tok
                .parse::<u32>()
                .with_context(|| format!("Invalid tile {i}: {tok:?}"))?;
            tiles.push(tile);
        }
        ensure!(
            tiles.len() == n * n,
            "Expecting {} tiles for dimension {n}, got {}",
            n * n,
            tiles.len(),
        );
        if let Some(tok) = tokens.next() {
            anyhow::bail!("Trailing token after the last tile: {tok:?}");
        }

        Ok(Board::from_tiles(n, &tiles)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, InvalidInput};

    #[test]
    fn parses_grid() {
        let b = "# puzzle04\n3\n 0  1  3\n 4  2  5\n 7  8  6\n"
            .parse::<Board>()
            .unwrap();
        assert_eq!(b, Board::new(&[[0, 1, 3], [4, 2, 5], [7, 8, 6]]).unwrap());
    }

    #[test]
    fn reports_bad_input() {
        let err = "".parse::<Board>().unwrap_err();
        assert_eq!(err.to_string(), "Missing dimension");

        let err = "2\n1 2\n3".parse::<Board>().unwrap_err();
        assert_eq!(err.to_string(), "Expecting 4 tiles for dimension 2, got 3");

        let err = "2\n1 x\n3 0".parse::<Board>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid tile 2: \"x\"");

        let err = "2\n1 2\n3 0 4".parse::<Board>().unwrap_err();
        assert_eq!(err.to_string(), "Trailing token after the last tile: \"4\"");

        let err = "2\n1 2\n3 3".parse::<Board>().unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidInput>(),
            Some(&InvalidInput::DuplicateTile(3)),
        );

        let err = "1\n0".parse::<Board>().unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidInput>(),
            Some(&InvalidInput::DimensionOutOfRange(1)),
        );
    }
}
