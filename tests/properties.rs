use cellua::{Automaton, Cursor, Error, patterns, rules};
use proptest::prelude::*;

/// Naive two-buffer Life step: reads every neighborhood from a full copy.
/// The engine must match this exactly, whatever its commit order.
fn life_reference(rows: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let height = rows.len() as i64;
    let width = rows[0].len() as i64;
    let get = |r: i64, c: i64| -> u8 {
        if r < 0 || c < 0 || r >= height || c >= width {
            0
        } else {
            rows[r as usize][c as usize]
        }
    };
    (0..height)
        .map(|r| {
            (0..width)
                .map(|c| {
                    let mut live = 0u8;
                    for dr in -1..=1 {
                        for dc in -1..=1 {
                            if (dr, dc) != (0, 0) {
                                live += get(r + dr, c + dc);
                            }
                        }
                    }
                    let center = get(r, c);
                    if !(2..=3).contains(&live) {
                        0
                    } else if live == 3 && center == 0 {
                        1
                    } else {
                        center
                    }
                })
                .collect()
        })
        .collect()
}

proptest! {
    #[test]
    fn step_matches_a_naive_two_buffer_reference(
        width in 1usize..14,
        height in 1usize..14,
        seed in any::<u64>(),
    ) {
        let rows = patterns::random_soup(height, width, 0.4, seed);
        let mut ca = Automaton::new(&rows, 0, rules::life).unwrap();
        ca.step().unwrap();
        let expected: Vec<u8> = life_reference(&rows).into_iter().flatten().collect();
        prop_assert_eq!(ca.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn parallel_and_sequential_steps_agree(
        width in 1usize..14,
        height in 1usize..14,
        seed in any::<u64>(),
        steps in 1u64..4,
    ) {
        let rows = patterns::random_soup(height, width, 0.4, seed);
        let mut seq = Automaton::new(&rows, 0, rules::life).unwrap();
        let mut par = Automaton::new(&rows, 0, rules::life).unwrap();
        for _ in 0..steps {
            seq.step().unwrap();
            par.step_parallel().unwrap();
        }
        prop_assert_eq!(&seq, &par);
        prop_assert_eq!(seq.generation(), par.generation());
    }

    #[test]
    fn dimensions_match_the_buffer(width in 1usize..60, height in 1usize..60) {
        let ca = Automaton::new(&vec![vec![0u8; width]; height], 0, rules::life).unwrap();
        prop_assert_eq!(ca.width(), width);
        prop_assert_eq!(ca.height(), height);
    }

    #[test]
    fn empty_grids_are_quiescent(
        width in 1usize..20,
        height in 1usize..20,
        steps in 0u64..8,
    ) {
        let mut ca = Automaton::new(&vec![vec![0u8; width]; height], 0, rules::life).unwrap();
        ca.run(steps).unwrap();
        prop_assert!(ca.iter().all(|v| v == 0));
        prop_assert_eq!(ca.generation(), steps);
    }

    #[test]
    fn cursor_visits_every_cell_then_exhausts(width in 1usize..12, height in 1usize..12) {
        let mut cursor = Cursor::new(width, height);
        for i in 0..width * height {
            prop_assert_eq!((cursor.row(), cursor.col()), (i / width + 1, i % width + 1));
            cursor.advance().unwrap();
        }
        prop_assert_eq!(cursor.advance(), Err(Error::ExhaustedBounds));
    }

    #[test]
    fn sum_rules_ignore_neighbor_order(
        seed in any::<u64>(),
        row in 1usize..9,
        col in 1usize..9,
        rotation in 0usize..8,
    ) {
        let rows = patterns::random_soup(8, 8, 0.5, seed);
        let ca = Automaton::new(&rows, 0, rules::life).unwrap();
        let view = ca.grid().neighborhood(row.min(8), col.min(8)).unwrap();

        let fixed = view.neighbors();
        let mut permuted = fixed;
        permuted.rotate_left(rotation);
        let mut reversed = fixed;
        reversed.reverse();

        let sum = |cells: [u8; 8]| cells.iter().copied().sum::<u8>();
        prop_assert_eq!(sum(fixed), sum(permuted));
        prop_assert_eq!(sum(fixed), sum(reversed));
        // Life depends on the view only through that sum and the center.
        let by_sum = |live: u8, center: u8| {
            if !(2..=3).contains(&live) { 0 } else if live == 3 && center == 0 { 1 } else { center }
        };
        prop_assert_eq!(
            rules::life(&view).unwrap(),
            by_sum(sum(permuted), view.center())
        );
    }
}
