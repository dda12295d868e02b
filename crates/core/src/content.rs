//! Built-in level templates, entry messages, and creature stat tables.

use crate::types::Race;

/// Walled entry chamber overlaid on the first cave. No stairs; the world
/// assembly carves those afterwards. The gap in the south wall keeps the
/// chamber connected to the cave around it.
pub const ENTRY_TEMPLATE: &str = "\
name: entry
type: static
size: 6 12
position: 1 2
map:
############
#          #
#          #
#          #
#          #
#####  #####
";

/// Pillared audience hall overlaid on the deepest cave.
pub const HALL_TEMPLATE: &str = "\
name: hall
type: static
size: 10 40
position: 6 20
map:
########################################
#                                      #
#  ##    ##    ##    ##    ##    ##    #
#                                      #
#                                      #
#                                      #
#  ##    ##    ##    ##    ##    ##    #
#                                      #
#                                      #
##################    ##################
";

pub const ENTRY_MESSAGE: &str = "You enter the Goblin's Caves";
pub const HALL_MESSAGE: &str = "Unwelcome to the Hall of the Goblin King";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatureStats {
    pub hp: i32,
    pub speed: u32,
}

pub fn race_stats(race: Race) -> CreatureStats {
    match race {
        Race::Human => CreatureStats { hp: 10, speed: 10 },
        Race::Goblin => CreatureStats { hp: 2, speed: 6 },
    }
}
