use std::fmt::{self, Write};

use crate::{Board, Direction};

impl Board {
    /// Renders the board in the input format, blank as `0`.
    pub fn to_input(&self) -> String {
        let n = self.dimension();
        let mut out = format!("{n}\n");
        for row in self.tiles.chunks(n) {
            let line = row.iter().map(u8::to_string).collect::<Vec<_>>().join(" ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.dimension();
        let width = (n * n - 1).to_string().len();
        writeln!(f, "{n}")?;
        let mut line = String::new();
        for (pos, tile) in self.cells() {
            if pos.1 != 0 {
                line.push(' ');
            }
            if tile == 0 {
                line.extend(std::iter::repeat(' ').take(width));
            } else {
                write!(line, "{tile:>width$}")?;
            }
            if pos.1 as usize + 1 == n {
                writeln!(f, "{}", line.trim_end())?;
                line.clear();
            }
        }
        Ok(())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Right => "Right",
            Direction::Down => "Down",
            Direction::Left => "Left",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, Direction};

    #[test]
    fn renders_blank_as_space() {
        let b = Board::new(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap();
        assert_eq!(b.to_string(), "3\n8 1 3\n4   2\n7 6 5\n");
        assert_eq!(b.to_input(), "3\n8 1 3\n4 0 2\n7 6 5\n");
    }

    #[test]
    fn right_aligns_wide_tiles() {
        let b = Board::goal(4).unwrap();
        assert_eq!(
            b.to_string(),
            "4\n 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14 15\n",
        );
        assert_eq!(b.to_input().parse::<Board>().unwrap(), b);
    }

    #[test]
    fn direction_names() {
        assert_eq!(Direction::Left.to_string(), "Left");
        assert_eq!(format!("{:>5}", Direction::Up), "   Up");
    }
}
