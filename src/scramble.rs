//! Random puzzle generation.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::{Board, InvalidInput};

type IndexSet<K> = indexmap::IndexSet<K, fxhash::FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct ScrambleConfig {
    /// Board dimension.
    pub size: usize,
    /// Random seed. `None` draws from the thread RNG.
    pub seed: Option<u64>,
    /// Length of a random walk from the goal. `None` shuffles every tile,
    /// which may produce an unsolvable board.
    pub walk: Option<usize>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            size: 3,
            seed: None,
            walk: None,
        }
    }
}

pub struct Scrambler {
    config: ScrambleConfig,
}

impl Scrambler {
    pub fn new(config: ScrambleConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self) -> Result<Board, InvalidInput> {
        let mut rng: Box<dyn RngCore> = match self.config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        };

        let goal = Board::goal(self.config.size)?;
        match self.config.walk {
            Some(steps) => Ok(random_walk(goal, steps, &mut rng)),
            None => {
                let mut tiles = goal.tiles().iter().map(|&t| t as u32).collect::<Vec<_>>();
                tiles.shuffle(&mut rng);
                Board::from_tiles(self.config.size, &tiles)
            }
        }
    }
}

/// Walks the blank for up to `steps` moves without revisiting a board.
/// Stops early if every neighbor was already visited.
fn random_walk(start: Board, steps: usize, rng: &mut impl Rng) -> Board {
    let mut visited = IndexSet::default();
    visited.insert(start);
    for _ in 0..steps {
        let current = &visited[visited.len() - 1];
        let fresh = current
            .neighbors()
            .into_iter()
            .filter(|board| !visited.contains(board))
            .collect::<ArrayVec<_, 4>>();
        let Some(next) = fresh.choose(rng) else { break };
        let next = next.clone();
        visited.insert(next);
    }
    visited.pop().expect("Walk starts from a board")
}
