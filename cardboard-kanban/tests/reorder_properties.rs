//! Property-based tests for drag-and-drop reordering
//!
//! Random boards receive random sequences of drags. After every drag the
//! columns must stay dense, no card may appear or vanish, and the write-set
//! must describe exactly the cards whose column or position changed.

use cardboard_kanban::{reorder, Card, CardId, CardMove, ColumnId, DropLocation};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

const COLUMNS: [&str; 3] = ["todo", "doing", "done"];

fn board(sizes: &[usize]) -> Vec<Card> {
    let mut cards = Vec::new();
    for (column, size) in COLUMNS.iter().zip(sizes) {
        for position in 0..*size {
            let mut card = Card::new(
                format!("{}-{}", column, position),
                ColumnId::from(*column),
                position,
            );
            card.id = CardId::from(format!("{}-{}", column, position));
            cards.push(card);
        }
    }
    cards
}

/// A drag described by indexes that are resolved against the current board
#[derive(Debug, Clone)]
struct Drag {
    pick: usize,
    column: usize,
    index: usize,
    cancelled: bool,
}

fn drag() -> impl Strategy<Value = Drag> {
    (0usize..64, 0usize..COLUMNS.len(), 0usize..10, prop::bool::weighted(0.1)).prop_map(
        |(pick, column, index, cancelled)| Drag {
            pick,
            column,
            index,
            cancelled,
        },
    )
}

fn resolve(cards: &[Card], drag: &Drag) -> Option<CardMove> {
    if cards.is_empty() {
        return None;
    }
    let card = &cards[drag.pick % cards.len()];
    let source_index = cardboard_kanban::reorder::column_cards(cards, &card.column)
        .iter()
        .position(|c| c.id == card.id)?;
    let source = DropLocation::new(card.column.clone(), source_index);

    Some(if drag.cancelled {
        CardMove::cancelled(card.id.clone(), source)
    } else {
        CardMove::new(
            card.id.clone(),
            source,
            DropLocation::new(COLUMNS[drag.column], drag.index),
        )
    })
}

fn dense(cards: &[Card]) -> bool {
    COLUMNS.iter().all(|column| {
        cardboard_kanban::reorder::column_cards(cards, &ColumnId::from(*column))
            .iter()
            .enumerate()
            .all(|(index, card)| card.position == index)
    })
}

fn ids(cards: &[Card]) -> BTreeSet<CardId> {
    cards.iter().map(|c| c.id.clone()).collect()
}

fn placements(cards: &[Card]) -> HashMap<CardId, (ColumnId, usize)> {
    cards
        .iter()
        .map(|c| (c.id.clone(), (c.column.clone(), c.position)))
        .collect()
}

proptest! {
    /// Property: every column stays dense and card ids are conserved
    #[test]
    fn prop_moves_keep_columns_dense(
        sizes in prop::collection::vec(0usize..6, COLUMNS.len()),
        drags in prop::collection::vec(drag(), 1..20)
    ) {
        let mut cards = board(&sizes);
        let original = ids(&cards);

        for drag in &drags {
            let Some(mv) = resolve(&cards, drag) else { continue };
            let outcome = reorder(&cards, &mv).unwrap();

            prop_assert!(dense(&outcome.cards));
            prop_assert_eq!(ids(&outcome.cards), original.clone());
            prop_assert_eq!(outcome.cards.len(), cards.len());

            cards = outcome.cards;
        }
    }

    /// Property: the write-set names exactly the cards that changed
    #[test]
    fn prop_write_set_matches_changes(
        sizes in prop::collection::vec(0usize..6, COLUMNS.len()),
        drag in drag()
    ) {
        let cards = board(&sizes);
        let Some(mv) = resolve(&cards, &drag) else { return Ok(()) };
        let outcome = reorder(&cards, &mv).unwrap();

        let before = placements(&cards);
        let after = placements(&outcome.cards);

        match outcome.writes {
            None => prop_assert_eq!(before, after),
            Some(writes) => {
                prop_assert_eq!(&writes.placement.card, &mv.card);
                prop_assert_eq!(
                    after.get(&mv.card),
                    Some(&(writes.placement.column.clone(), writes.placement.position))
                );

                let written: BTreeSet<CardId> =
                    writes.positions.iter().map(|u| u.card.clone()).collect();
                prop_assert!(!written.contains(&mv.card));

                for (id, now) in &after {
                    if id == &mv.card {
                        continue;
                    }
                    let changed = before.get(id) != Some(now);
                    prop_assert_eq!(changed, written.contains(id));
                }
                for update in &writes.positions {
                    prop_assert_eq!(after[&update.card].1, update.position);
                }
            }
        }
    }

    /// Property: cancelled and in-place drops change nothing
    #[test]
    fn prop_noop_moves_are_identity(
        sizes in prop::collection::vec(1usize..6, COLUMNS.len()),
        pick in 0usize..64
    ) {
        let cards = board(&sizes);
        let card = &cards[pick % cards.len()];
        let index = cardboard_kanban::reorder::column_cards(&cards, &card.column)
            .iter()
            .position(|c| c.id == card.id)
            .unwrap();
        let here = DropLocation::new(card.column.clone(), index);

        let cancelled = reorder(&cards, &CardMove::cancelled(card.id.clone(), here.clone())).unwrap();
        prop_assert!(cancelled.is_noop());
        prop_assert_eq!(&cancelled.cards, &cards);

        let in_place = reorder(&cards, &CardMove::new(card.id.clone(), here.clone(), here)).unwrap();
        prop_assert!(in_place.is_noop());
        prop_assert_eq!(&in_place.cards, &cards);
    }
}
