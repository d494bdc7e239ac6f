use crate::cursor::Neighborhood;
use crate::error::Error;

/// Stock transition rules over `u8` cells, where 0 is empty and 1 is
/// live. With that encoding a sum over `neighbors()` is the live-neighbor
/// count, which keeps every rule here independent of neighbor ordering.
pub const EMPTY: u8 = 0;
pub const ALIVE: u8 = 1;

/// Conway's Life: birth on exactly 3 live neighbors, survival on 2 or 3.
pub fn life(view: &Neighborhood<'_, u8>) -> Result<u8, Error> {
    let live: u8 = view.neighbors().iter().sum();
    let center = view.center();
    if !(2..=3).contains(&live) {
        Ok(EMPTY)
    } else if live == 3 && center == EMPTY {
        Ok(ALIVE)
    } else {
        Ok(center)
    }
}

/// Seeds: birth on exactly 2 live neighbors, every live cell dies.
pub fn seeds(view: &Neighborhood<'_, u8>) -> Result<u8, Error> {
    let live: u8 = view.neighbors().iter().sum();
    if live == 2 && view.center() == EMPTY {
        Ok(ALIVE)
    } else {
        Ok(EMPTY)
    }
}
