use crate::*;
use rand::Rng;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate<R: Rng + ?Sized>(&self, config: BoardConfig, rng: &mut R) -> BombLayout;
}
