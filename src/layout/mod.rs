/// Row positioning for the track listing.
pub mod rows;
