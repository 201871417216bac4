use super::*;
use ndarray::Array2;

/// Picks every bomb position uniformly at random without replacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RandomLayoutGenerator;

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate<R: Rng + ?Sized>(&self, config: BoardConfig, rng: &mut R) -> BombLayout {
        let total_cells = config.total_cells() as usize;
        let cols = usize::from(config.cols());
        let mut bomb_mask: Array2<bool> = Array2::default(config.size().to_nd_index());

        // optimize for full boards
        if config.bombs() as usize >= total_cells {
            bomb_mask.fill(true);
        } else {
            for index in rand::seq::index::sample(rng, total_cells, config.bombs() as usize) {
                bomb_mask[[index / cols, index % cols]] = true;
            }
        }

        let layout = BombLayout::from_bomb_mask(bomb_mask);
        if layout.bomb_count() != config.bombs() {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.bomb_count(),
                config.bombs()
            );
        }
        log::debug!(
            "Generated {}x{} layout with {} bombs",
            config.rows(),
            config.cols(),
            layout.bomb_count()
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn generate(rows: Coord, cols: Coord, bombs: CellCount, seed: u64) -> BombLayout {
        let config = BoardConfig::new(rows, cols, bombs).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        RandomLayoutGenerator.generate(config, &mut rng)
    }

    #[test]
    fn places_exact_bomb_count() {
        for seed in 0..20 {
            let layout = generate(9, 9, 10, seed);
            assert_eq!(layout.bomb_count(), 10);
            assert_eq!(layout.size(), (9, 9));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(generate(16, 30, 99, 7), generate(16, 30, 99, 7));
    }

    #[test]
    fn full_and_empty_boards() {
        assert_eq!(generate(3, 4, 12, 1).bomb_count(), 12);
        assert_eq!(generate(3, 4, 0, 1).bomb_count(), 0);
    }
}
