use std::collections::VecDeque;

use life_history::ring_buffer::{BinaryRingBuffer, CellField, GenerationStore, GenericRingBuffer};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Append,
    Remove,
    KeepNewest,
    KeepOldest,
    Free,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Append),
        2 => Just(Op::Remove),
        1 => Just(Op::KeepNewest),
        1 => Just(Op::KeepOldest),
        1 => Just(Op::Free),
    ]
}

prop_compose! {
    fn arb_shape()(capacity in 2usize..9, width in 1usize..6, height in 1usize..6) -> (usize, usize, usize) {
        (capacity, width, height)
    }
}

/// Applies `op` to both the buffer and a deque model of the tags it should hold.
fn apply(buf: &mut GenericRingBuffer<u32>, model: &mut VecDeque<u32>, op: &Op, next_tag: &mut u32) {
    match op {
        Op::Append => {
            *next_tag += 1;
            buf.append_generation_with(*next_tag);
            if model.len() == buf.capacity() {
                model.pop_front();
            }
            model.push_back(*next_tag);
        }
        Op::Remove => {
            let removed = buf.remove_generation();
            assert_eq!(removed, model.len() > 1);
            if removed {
                model.pop_back();
            }
        }
        Op::KeepNewest => {
            buf.reset_to_newest();
            let newest = *model.back().unwrap();
            model.clear();
            model.push_back(newest);
        }
        Op::KeepOldest => {
            buf.reset_to_oldest();
            model.truncate(1);
        }
        Op::Free => {
            buf.free_unused_memory();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_buffer_matches_deque_model(
        (capacity, width, height) in arb_shape(),
        ops in prop::collection::vec(arb_op(), 0..60)
    ) {
        let mut buf = GenericRingBuffer::<u32>::new(capacity, width, height).unwrap();
        let mut model = VecDeque::from(vec![0u32]);
        let mut next_tag = 0;

        for op in &ops {
            apply(&mut buf, &mut model, op, &mut next_tag);

            prop_assert!(buf.len() >= 1 && buf.len() <= capacity);
            prop_assert_eq!(buf.len(), model.len());
            for (i, tag) in model.iter().enumerate() {
                let field = buf.at(i).unwrap();
                prop_assert_eq!(field.get(0, 0).unwrap(), *tag);
                prop_assert_eq!(field.get(width - 1, height - 1).unwrap(), *tag);
            }
            prop_assert!(buf.at(model.len()).is_err());
        }
    }

    #[test]
    fn test_free_unused_memory_keeps_live_cells(
        (capacity, width, height) in arb_shape(),
        appends in 0usize..20,
        removes in 0usize..20,
        seed_cells in prop::collection::vec(any::<bool>(), 25)
    ) {
        let mut buf = BinaryRingBuffer::new(capacity, width, height).unwrap();
        for (n, alive) in seed_cells.iter().enumerate() {
            let (x, y) = (n % 5, n / 5);
            if x < width && y < height {
                buf.newest_mut().set(x, y, *alive).unwrap();
            }
        }
        for i in 0..appends {
            buf.append_generation_with(i % 2 == 0);
        }
        buf.remove_generations(removes);

        let before: Vec<_> = (0..buf.len()).map(|i| buf.at(i).unwrap().to_pattern()).collect();
        let released = buf.free_unused_memory();
        let after: Vec<_> = (0..buf.len()).map(|i| buf.at(i).unwrap().to_pattern()).collect();

        prop_assert_eq!(before, after);
        prop_assert!(buf.allocated_slots() <= buf.len());
        prop_assert!(released <= capacity - buf.len());
        prop_assert_eq!(buf.free_unused_memory(), 0);
    }

    #[test]
    fn test_resize_keeps_newest_generations(
        (capacity, width, height) in arb_shape(),
        (new_capacity, new_width, new_height) in arb_shape(),
        appends in 0usize..20
    ) {
        let mut buf = GenericRingBuffer::<u32>::new(capacity, width, height).unwrap();
        for tag in 1..=appends as u32 {
            buf.append_generation_with(tag);
        }
        let resized = GenericRingBuffer::resized_from(new_capacity, new_width, new_height, &buf, u32::MAX).unwrap();

        let kept = buf.len().min(new_capacity);
        prop_assert_eq!(resized.len(), kept);
        prop_assert_eq!((resized.width(), resized.height()), (new_width, new_height));
        for i in 0..kept {
            let expected = buf.at(buf.len() - kept + i).unwrap().get(0, 0).unwrap();
            prop_assert_eq!(resized.at(i).unwrap().get(0, 0).unwrap(), expected);
        }
        if new_width > width {
            prop_assert_eq!(resized.newest().get(new_width - 1, 0).unwrap(), u32::MAX);
        }
    }
}
