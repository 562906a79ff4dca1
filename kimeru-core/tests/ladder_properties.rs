use kimeru_core::config::{LabelConfig, LadderConfig};
use kimeru_core::{Ladder, LadderGenerator, PickerError, trace_starting_point};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const DRAWS_PER_WIDTH: u64 = 100;

fn generator() -> LadderGenerator {
    LadderGenerator::new(LadderConfig::default(), LabelConfig::default())
}

#[test]
fn every_draw_is_a_permutation_without_shared_rails() {
    let generator = generator();
    for columns in 2..=12 {
        for seed in 0..DRAWS_PER_WIDTH {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let draw = generator
                .generate(columns, &["prize"], &mut rng)
                .expect("columns >= 2");
            assert!(
                draw.mapping().is_permutation(),
                "columns {columns} seed {seed}: {:?}",
                draw.mapping()
            );
            for row in draw.ladder().rungs() {
                assert!(
                    row.windows(2).all(|pair| !(pair[0] && pair[1])),
                    "columns {columns} seed {seed}: rail shared in {row:?}"
                );
            }
        }
    }
}

#[test]
fn repaired_ladders_connect_nearly_always() {
    let generator = generator();
    for columns in [2_usize, 3, 6, 10] {
        let satisfied = (0..DRAWS_PER_WIDTH)
            .filter(|seed| {
                let mut rng = ChaCha20Rng::seed_from_u64(*seed);
                let (_, connectivity) = generator
                    .build_ladder(columns, &mut rng)
                    .expect("columns >= 2");
                connectivity.is_satisfied()
            })
            .count();
        assert!(
            satisfied >= 99,
            "columns {columns}: only {satisfied}/{DRAWS_PER_WIDTH} ladders fully connected"
        );
    }
}

#[test]
fn trace_ends_where_the_mapping_says() {
    let generator = generator();
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for _ in 0..25 {
        let draw = generator
            .generate(7, &["A", "B"], &mut rng)
            .expect("seven rails");
        for start in 0..7 {
            let path = trace_starting_point(draw.ladder(), draw.mapping(), start)
                .expect("start is a rail");
            let first = path.first().expect("path has a top");
            let last = path.last().expect("path has a bottom");
            assert_eq!(first.rail, start);
            assert_eq!(first.boundary, 0);
            assert_eq!(Some(last.rail), draw.mapping().destination(start));
            assert_eq!(last.boundary, draw.ladder().rows() + 1);
        }
    }
}

#[test]
fn winner_count_is_capped_by_rails() {
    let generator = generator();
    let prizes = ["A", "B", "C", "D", "E"];
    for columns in 2..=8 {
        let mut rng = ChaCha20Rng::seed_from_u64(columns as u64);
        let draw = generator
            .generate(columns, &prizes, &mut rng)
            .expect("columns >= 2");
        assert_eq!(draw.winning_starts().len(), prizes.len().min(columns));
        assert_eq!(
            draw.prizes().winning_slots().len(),
            prizes.len().min(columns)
        );
    }
}

#[test]
fn three_rails_two_prizes_each_land_once() {
    let generator = generator();
    for seed in 0..20 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let draw = generator
            .generate(3, &["A", "B"], &mut rng)
            .expect("three rails");
        let labels = &draw.prizes().bottom_labels;
        assert_eq!(labels.iter().filter(|label| *label == "A").count(), 1);
        assert_eq!(labels.iter().filter(|label| *label == "B").count(), 1);
        assert_eq!(labels.iter().filter(|label| *label == "ハズレ").count(), 1);

        let items = ["x", "y", "z"];
        let winners: Vec<_> = draw
            .assignments(&items)
            .into_iter()
            .filter(|assignment| assignment.is_prize)
            .collect();
        assert_eq!(winners.len(), 2);
    }
}

#[test]
fn prize_sharing_the_loss_name_is_counted() {
    let generator = generator();
    for seed in 0..10 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let draw = generator
            .generate(4, &["ハズレ", "A"], &mut rng)
            .expect("four rails");
        assert_eq!(draw.prizes().winning_slots().len(), 2);
        let winners: Vec<_> = draw
            .assignments(&["w", "x", "y", "z"])
            .into_iter()
            .filter(|assignment| assignment.is_prize)
            .map(|assignment| assignment.start)
            .collect();
        assert_eq!(winners, draw.winning_starts());
    }
}

#[test]
fn empty_prize_list_uses_default_prize() {
    let generator = generator();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let none: [&str; 0] = [];
    let draw = generator.generate(4, &none, &mut rng).expect("four rails");
    assert_eq!(draw.winning_starts().len(), 1);
    assert!(draw.prizes().bottom_labels.iter().any(|label| label == "当たり"));
}

#[test]
fn single_rail_is_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    assert_eq!(
        generator().generate(1, &["A"], &mut rng).unwrap_err(),
        PickerError::InsufficientItems {
            found: 1,
            required: 2
        }
    );
}

#[test]
fn hand_built_ladder_swaps_first_pair() {
    let ladder = Ladder::from_rungs(4, vec![vec![true, false, false]]).expect("valid row");
    assert_eq!(ladder.mapping().as_slice(), &[1, 0, 2, 3]);
    let path = ladder.trace(0).expect("rail 0");
    assert_eq!(path.last().map(|point| point.rail), Some(1));
}
