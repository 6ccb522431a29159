use mission_core::{
    layout_week, pack_columns, ActivityEvent, ColumnAssignment, EventId, Interval, LayoutOptions,
    WeekGrid,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn monday(id: EventId, start: &str, end: &str) -> ActivityEvent {
    ActivityEvent::new(id, format!("activity {id}"), "2025-03-10").with_times(
        Some(&format!("2025-03-10T{start}:00")),
        Some(&format!("2025-03-10T{end}:00")),
    )
}

fn slot(column: usize, total_columns: usize) -> Option<ColumnAssignment> {
    Some(ColumnAssignment {
        column,
        total_columns,
    })
}

#[test]
fn overlapping_monday_events_sit_side_by_side() {
    let layout = layout_week(
        &[monday(1, "09:00", "10:00"), monday(2, "09:30", "10:30")],
        &LayoutOptions::default(),
    );

    assert_eq!(layout.assignment(1), slot(0, 2));
    assert_eq!(layout.assignment(2), slot(1, 2));
}

#[test]
fn back_to_back_events_share_a_column() {
    let layout = layout_week(
        &[monday(1, "09:00", "10:00"), monday(3, "10:00", "11:00")],
        &LayoutOptions::default(),
    );

    assert_eq!(layout.assignment(1), slot(0, 1));
    assert_eq!(layout.assignment(3), slot(0, 1));
}

#[test]
fn three_pairwise_overlapping_events_need_three_columns() {
    let layout = layout_week(
        &[
            monday(1, "09:00", "12:00"),
            monday(2, "10:00", "12:00"),
            monday(3, "11:00", "12:00"),
        ],
        &LayoutOptions::default(),
    );

    let columns: Vec<usize> = layout.placements.iter().map(|event| event.column).collect();
    assert_eq!(columns, vec![0, 1, 2]);
    assert!(layout.placements.iter().all(|event| event.total_columns == 3));
}

#[test]
fn two_disjoint_overlapping_pairs_need_two_columns() {
    let slots = pack_columns(&[
        Interval::new(9.0, 10.0),
        Interval::new(9.5, 10.5),
        Interval::new(13.0, 14.0),
        Interval::new(13.5, 14.5),
    ]);
    assert!(slots.iter().all(|slot| slot.total_columns == 2));
}

#[test]
fn arrival_order_breaks_start_ties() {
    let forward = layout_week(
        &[monday(1, "09:00", "10:00"), monday(2, "09:00", "10:00")],
        &LayoutOptions::default(),
    );
    let reversed = layout_week(
        &[monday(2, "09:00", "10:00"), monday(1, "09:00", "10:00")],
        &LayoutOptions::default(),
    );

    assert_eq!(forward.assignment(1), slot(0, 2));
    assert_eq!(reversed.assignment(1), slot(1, 2));
}

#[test]
fn weekend_and_out_of_window_events_are_left_out() {
    let events = vec![
        monday(1, "09:00", "10:00"),
        ActivityEvent::new(2, "Saturday brunch", "2025-03-15"),
        monday(3, "19:00", "20:00"),
        ActivityEvent::new(4, "Undated", "soon"),
    ];
    let layout = layout_week(&events, &LayoutOptions::default());

    assert_eq!(layout.len(), 1);
    assert_eq!(layout.columns.keys().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn week_grid_layout_uses_configured_window() {
    let options = LayoutOptions {
        visible_start_hour: 6.0,
        visible_end_hour: 22.0,
        ..LayoutOptions::default()
    };
    let grid = WeekGrid::containing(chrono::NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
    let layout = grid.layout(&[monday(1, "19:00", "20:00")], &options);

    assert_eq!(layout.placements[0].start_hour, 19.0);
    assert_eq!(WeekGrid::hour_rows(&options).len(), 17);
}

proptest! {
    #[test]
    fn same_column_never_overlaps(
        raw in prop::collection::vec((0u32..40, 1u32..12), 0..40)
    ) {
        let intervals: Vec<Interval> = raw
            .iter()
            .map(|(start, len)| {
                let start = 8.0 + f64::from(*start) * 0.25;
                Interval::new(start, start + f64::from(*len) * 0.25)
            })
            .collect();
        let slots = pack_columns(&intervals);

        prop_assert_eq!(slots.len(), intervals.len());
        for (i, a) in intervals.iter().enumerate() {
            prop_assert!(slots[i].column < slots[i].total_columns);
            for (j, b) in intervals.iter().enumerate().skip(i + 1) {
                if slots[i].column == slots[j].column {
                    prop_assert!(!a.overlaps(b), "{:?} and {:?} share column {}", a, b, slots[i].column);
                }
            }
        }
    }

    #[test]
    fn layout_is_deterministic(
        raw in prop::collection::vec((0u32..5, 0u32..20, 1u32..8), 0..30)
    ) {
        let events: Vec<ActivityEvent> = raw
            .iter()
            .enumerate()
            .map(|(idx, (day, start, len))| {
                let date = format!("2025-03-{:02}", 10 + day);
                let start_min = 8 * 60 + start * 30;
                let end_min = start_min + len * 30;
                ActivityEvent::new(idx as EventId, "x", date.clone()).with_times(
                    Some(&format!("{date}T{:02}:{:02}", start_min / 60, start_min % 60)),
                    Some(&format!("{date}T{:02}:{:02}", end_min / 60, end_min % 60)),
                )
            })
            .collect();
        let options = LayoutOptions::default();

        prop_assert_eq!(layout_week(&events, &options), layout_week(&events, &options));
    }
}
