use bevy_ecs::prelude::*;

use crate::simulation::WorldCalendar;

/// One tick is one simulated day.
pub fn clock_system(mut calendar: ResMut<WorldCalendar>) {
    calendar.date.advance();
}
