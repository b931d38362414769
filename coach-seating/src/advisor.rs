use coach_shared::SelectedSeat;
use crate::layout::SeatSchema;

/// Companion seats for a lone selection, so a second traveller can sit next to the first.
///
/// Returns nothing unless exactly one seat is selected. Otherwise returns the
/// empty seats directly left and right of it (in that order). Adjacency is by
/// grid position only: a row label or blank between two seats breaks it even
/// when their numbers are consecutive. The result is advisory and never limits
/// what can be toggled.
pub fn suggest_companions(selection: &[SelectedSeat], schema: &SeatSchema) -> Vec<u32> {
    let [only] = selection else {
        return Vec::new();
    };

    let row = only.seat.row;
    let column = only.seat.column;

    let left = column.checked_sub(1).and_then(|c| schema.seat_at(row, c));
    let right = schema.seat_at(row, column + 1);

    [left, right]
        .into_iter()
        .flatten()
        .filter(|seat| seat.is_empty())
        .map(|seat| seat.number)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_shared::{LayoutPayload, SeatSchemaPayload};

    fn schema(cells: Vec<Vec<i32>>) -> SeatSchema {
        SeatSchema::from_payload(SeatSchemaPayload {
            trip_id: "TRIP-1001".to_string(),
            layout: LayoutPayload { rows: cells.len(), cols: cells[0].len(), cells },
            seats: vec![],
            unit_price: 695,
        })
        .unwrap()
    }

    fn pick(schema: &SeatSchema, numbers: &[u32]) -> Vec<SelectedSeat> {
        numbers
            .iter()
            .map(|n| SelectedSeat::new(schema.seat(*n).unwrap().clone(), schema.unit_price))
            .collect()
    }

    #[test]
    fn test_label_column_breaks_adjacency() {
        let schema = schema(vec![vec![0, 0, 2, 0, 0]]);

        assert_eq!(suggest_companions(&pick(&schema, &[1]), &schema), vec![2]);
        assert_eq!(suggest_companions(&pick(&schema, &[2]), &schema), vec![1]);
        assert_eq!(suggest_companions(&pick(&schema, &[3]), &schema), vec![4]);
    }

    #[test]
    fn test_left_then_right_and_taken_excluded() {
        let schema = schema(vec![
            vec![0, 0, 0, 3, 0],
            vec![1, 0, 1, 3, 0],
        ]);

        // Seat 2 sits between 1 and 3
        assert_eq!(suggest_companions(&pick(&schema, &[2]), &schema), vec![1, 3]);
        // Seat 6 (row 2, col 2) has taken seats on both sides
        assert!(suggest_companions(&pick(&schema, &[6]), &schema).is_empty());
        // Seat 3 is followed by a blank; seat 4 is not adjacent
        assert_eq!(suggest_companions(&pick(&schema, &[3]), &schema), vec![2]);
    }

    #[test]
    fn test_no_suggestion_unless_exactly_one_selected() {
        let schema = schema(vec![vec![0, 0, 0, 0]]);

        assert!(suggest_companions(&[], &schema).is_empty());
        assert!(suggest_companions(&pick(&schema, &[1, 3]), &schema).is_empty());
    }

    #[test]
    fn test_edge_seats_only_look_inward() {
        let schema = schema(vec![vec![0, 0, 0]]);

        assert_eq!(suggest_companions(&pick(&schema, &[1]), &schema), vec![2]);
        assert_eq!(suggest_companions(&pick(&schema, &[3]), &schema), vec![2]);
    }
}
