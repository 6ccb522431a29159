//! Safe-sleep bed board.

use crate::model::{ClientId, Service, ServiceVisit};
use serde::Serialize;

/// Beds available when none are configured.
pub const DEFAULT_BED_COUNT: u32 = 20;

/// One bed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BedSlot {
    /// 1-based bed number.
    pub bed_no: u32,
    pub client_id: Option<ClientId>,
    pub occupied: bool,
}

/// Snapshot of every safe-sleep bed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedBoard {
    pub beds: Vec<BedSlot>,
}

impl BedBoard {
    pub fn capacity(&self) -> usize {
        self.beds.len()
    }

    pub fn occupied(&self) -> usize {
        self.beds.iter().filter(|bed| bed.occupied).count()
    }

    /// Occupied share in `0.0..=1.0`; `0` for a board without beds.
    pub fn occupancy_rate(&self) -> f64 {
        if self.beds.is_empty() {
            0.0
        } else {
            self.occupied() as f64 / self.capacity() as f64
        }
    }
}

/// Fills `bed_count` slots from occupied safe-sleep visits.
///
/// Visits for other services, unoccupied visits, and bed numbers outside
/// `1..=bed_count` are ignored. When two visits claim one bed, the later
/// visit wins.
pub fn bed_board(visits: &[ServiceVisit], bed_count: u32) -> BedBoard {
    let mut beds: Vec<BedSlot> = (1..=bed_count)
        .map(|bed_no| BedSlot {
            bed_no,
            client_id: None,
            occupied: false,
        })
        .collect();

    for visit in visits
        .iter()
        .filter(|visit| visit.service == Service::SafeSleep && visit.is_occupied)
    {
        let Some(bed_no) = visit.bed_no else {
            continue;
        };
        if bed_no == 0 || bed_no > bed_count {
            continue;
        }
        let slot = &mut beds[(bed_no - 1) as usize];
        slot.client_id = Some(visit.client_id);
        slot.occupied = true;
    }

    BedBoard { beds }
}
