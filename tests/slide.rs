use std::fmt::Write;

use anyhow::{ensure, Context};
use common::*;
use slider_solver::Board;

mod common;

fn main() {
    run_tests("slide", |content| {
        let input = split_input(content);
        let (actions, puzzle) = input.split_once('\n').context("No actions")?;
        let actions = actions.trim();
        ensure!(!actions.is_empty(), "No actions");

        let mut board = puzzle.parse::<Board>().context("Invalid puzzle")?;
        let mut got = format!("{input}\n\n{SEPARATOR}");
        for (ch, i) in actions.chars().zip(1..) {
            board = (|| {
                let dir = parse_direction(ch)?;
                board.slide(dir).context("Move failed")
            })()
            .with_context(|| format!("Failed to perform step {i} {ch}"))?;
            write!(got, "{board}{SEPARATOR}").unwrap();
        }

        Ok(got)
    });
}
