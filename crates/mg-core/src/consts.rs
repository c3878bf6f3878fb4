//! Generation constants

/// Shortest shared border that two regions need to be connected
pub const MIN_BORDER_LENGTH: i32 = 5;

/// Border crossings stay this far from either end of the shared segment
pub const BORDER_INSET: i32 = 2;

/// Exits on the same room stay at least this far apart when there is room
pub const MIN_EXIT_SPACING: u32 = 3;

/// Corridors keep this Chebyshev distance from exits they do not use
pub const EXIT_CLEARANCE: u32 = 2;

/// Step cost of digging through rock
pub const NEW_HALL_COST: u32 = 100;

/// Step cost of walking an already-carved corridor
pub const EXISTING_HALL_COST: u32 = 1;
