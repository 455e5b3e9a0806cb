//! Hourly sea-creature mascot shown next to the MET clock.
//!
//! The pick is deterministic in (hour, day-of-year) so the same creature
//! holds for a whole hour and the rotation varies across days.

use chrono::{Datelike, NaiveDate};

/// One mascot: a Dutch name and the glyph rendered in the title row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeaCreature {
    pub name: &'static str,
    pub glyph: &'static str,
}

/// All available sea creatures, in rotation order.
pub const SEA_CREATURES: &[SeaCreature] = &[
    SeaCreature { name: "Krab", glyph: "🦀" },
    SeaCreature { name: "Dolfijn", glyph: "🐬" },
    SeaCreature { name: "Vis", glyph: "🐟" },
    SeaCreature { name: "Tropische vis", glyph: "🐠" },
    SeaCreature { name: "Kogelvis", glyph: "🐡" },
    SeaCreature { name: "Kwal", glyph: "🪼" },
    SeaCreature { name: "Kreeft", glyph: "🦞" },
    SeaCreature { name: "Octopus", glyph: "🐙" },
    SeaCreature { name: "Oester", glyph: "🦪" },
    SeaCreature { name: "Zeehond", glyph: "🦭" },
    SeaCreature { name: "Haai", glyph: "🦈" },
    SeaCreature { name: "Schelp", glyph: "🐚" },
    SeaCreature { name: "Garnaal", glyph: "🦐" },
    SeaCreature { name: "Inktvis", glyph: "🦑" },
    SeaCreature { name: "Golf", glyph: "🌊" },
    SeaCreature { name: "Walvis", glyph: "🐳" },
];

/// The mascot for a given date and hour.
///
/// Seeded with `hour + day_of_year` so consecutive hours differ and the
/// same hour differs across days.
pub fn creature_for_hour(date: NaiveDate, hour: u32) -> &'static SeaCreature {
    let seed = (hour + date.ordinal()) as usize % SEA_CREATURES.len();
    &SEA_CREATURES[seed]
}
