//! Drag-and-drop reordering.
//!
//! Given every card loaded for a board and the outcome of a drag (card, where
//! it was picked up, where it was dropped), [`reorder`] produces the new card
//! set together with the smallest set of writes that brings storage in line
//! with it. Nothing here performs I/O; the caller decides when to show the new
//! cards and when to commit the [`WriteSet`].
//!
//! Positions are recomputed against the destination list *after* the moved
//! card has been taken out of it, so a same-column move never has to correct
//! for its own old slot. Both the destination and the vacated source column
//! come out dense and zero-based.

use crate::error::{KanbanError, Result};
use crate::types::{Card, CardId, ColumnId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A slot in a column: the column and the zero-based index within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropLocation {
    pub column: ColumnId,
    pub index: usize,
}

impl DropLocation {
    pub fn new(column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

/// The outcome of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMove {
    /// The dragged card
    pub card: CardId,
    /// Where the card was picked up
    pub source: DropLocation,
    /// Where it was dropped; `None` when the drop was cancelled
    #[serde(default)]
    pub destination: Option<DropLocation>,
}

impl CardMove {
    /// A completed drag from `source` to `destination`
    pub fn new(card: impl Into<CardId>, source: DropLocation, destination: DropLocation) -> Self {
        Self {
            card: card.into(),
            source,
            destination: Some(destination),
        }
    }

    /// A drag that ended outside any column
    pub fn cancelled(card: impl Into<CardId>, source: DropLocation) -> Self {
        Self {
            card: card.into(),
            source,
            destination: None,
        }
    }

    /// Whether this move leaves everything where it was
    pub fn is_noop(&self) -> bool {
        match &self.destination {
            None => true,
            Some(destination) => destination == &self.source,
        }
    }
}

/// New column and position of the moved card. Always written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub card: CardId,
    pub column: ColumnId,
    pub position: usize,
}

/// New position of a sibling that shifted because of a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub card: CardId,
    pub position: usize,
}

/// Everything storage needs to learn about one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteSet {
    pub placement: Placement,
    /// Siblings in the destination and source columns whose position changed
    pub positions: Vec<PositionUpdate>,
}

impl WriteSet {
    /// Number of card rows this write-set touches
    pub fn len(&self) -> usize {
        1 + self.positions.len()
    }

    /// A write-set always carries at least the placement
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Result of [`reorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reorder {
    /// The full card set after the move, every column merged back together
    pub cards: Vec<Card>,
    /// `None` when the move was a no-op
    pub writes: Option<WriteSet>,
}

impl Reorder {
    fn unchanged(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
            writes: None,
        }
    }

    /// Whether the move changed nothing
    pub fn is_noop(&self) -> bool {
        self.writes.is_none()
    }
}

/// Cards of `column` in display order.
///
/// Ties on `position` keep the order in which the cards were supplied.
pub fn column_cards<'a>(cards: &'a [Card], column: &ColumnId) -> Vec<&'a Card> {
    let mut list: Vec<&Card> = cards.iter().filter(|c| &c.column == column).collect();
    list.sort_by_key(|c| c.position);
    list
}

/// Position updates that would make `column` dense again, in display order.
pub fn compact(cards: &[Card], column: &ColumnId) -> Vec<PositionUpdate> {
    column_cards(cards, column)
        .into_iter()
        .enumerate()
        .filter(|(index, card)| card.position != *index)
        .map(|(index, card)| PositionUpdate {
            card: card.id.clone(),
            position: index,
        })
        .collect()
}

/// Apply a drag outcome to `cards`.
///
/// Cancelled drops and drops back onto the pickup slot return the input
/// unchanged with no write-set. A `card` that is not in `cards` fails with
/// [`KanbanError::CardNotFound`] and nothing is computed.
pub fn reorder(cards: &[Card], mv: &CardMove) -> Result<Reorder> {
    let Some(destination) = mv.destination.as_ref() else {
        debug!(card = %mv.card, "drop cancelled");
        return Ok(Reorder::unchanged(cards));
    };

    if destination == &mv.source {
        debug!(card = %mv.card, column = %destination.column, index = destination.index, "dropped in place");
        return Ok(Reorder::unchanged(cards));
    }

    let moved = cards
        .iter()
        .find(|c| c.id == mv.card)
        .ok_or_else(|| KanbanError::CardNotFound {
            id: mv.card.to_string(),
        })?;

    // The card's own column reference wins over the drag source.
    let origin = moved.column.clone();
    if origin != mv.source.column {
        debug!(
            card = %mv.card,
            reported = %mv.source.column,
            actual = %origin,
            "drag source disagrees with card column"
        );
    }

    let mut positions = Vec::new();

    let mut destination_list = detached(cards, &destination.column, &mv.card);
    let index = destination.index.min(destination_list.len());
    let mut moved_card = moved.clone();
    moved_card.column = destination.column.clone();
    destination_list.insert(index, moved_card);
    renumber(&mut destination_list, &mv.card, &mut positions);

    let source_list = if origin != destination.column {
        let mut list = detached(cards, &origin, &mv.card);
        renumber(&mut list, &mv.card, &mut positions);
        Some(list)
    } else {
        None
    };

    let mut merged: Vec<Card> = cards
        .iter()
        .filter(|c| c.id != mv.card && c.column != destination.column && c.column != origin)
        .cloned()
        .collect();
    merged.extend(source_list.into_iter().flatten());
    merged.extend(destination_list);

    debug!(
        card = %mv.card,
        from = %origin,
        to = %destination.column,
        index,
        shifted = positions.len(),
        "reordered"
    );

    Ok(Reorder {
        cards: merged,
        writes: Some(WriteSet {
            placement: Placement {
                card: mv.card.clone(),
                column: destination.column.clone(),
                position: index,
            },
            positions,
        }),
    })
}

/// Owned, ordered copy of `column` without `exclude`.
fn detached(cards: &[Card], column: &ColumnId, exclude: &CardId) -> Vec<Card> {
    column_cards(cards, column)
        .into_iter()
        .filter(|c| &c.id != exclude)
        .cloned()
        .collect()
}

/// Set `position = index` throughout `list`, recording every sibling that
/// actually moved. The dragged card is covered by its placement.
fn renumber(list: &mut [Card], moved: &CardId, positions: &mut Vec<PositionUpdate>) {
    for (index, card) in list.iter_mut().enumerate() {
        if card.position != index {
            card.position = index;
            if &card.id != moved {
                positions.push(PositionUpdate {
                    card: card.id.clone(),
                    position: index,
                });
            }
        }
    }
}
