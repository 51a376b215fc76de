//! Canned headlines the generator cycles through.

use super::types::ItemId;

/// Headlines emitted in order; item `n` gets `TITLE_BANK[(n - 1) % len]`.
pub const TITLE_BANK: [&str; 8] = [
    "Researchers Build an IoT-Based Smart Farming System",
    "Students Win Gold at the International Robotics Competition",
    "Faculty of Engineering Opens an Artificial Intelligence Program",
    "Women's Basketball Team Takes the National Inter-University Title",
    "Cybersecurity Workshop Draws 500 Participants from 30 Cities",
    "Renewable Energy Research Published in a Q1 Scopus Journal",
    "Student Futsal League: A Dramatic Semifinal",
    "University and Google Launch a Cloud Computing Scholarship",
];

/// Title for the item with the given id.
///
/// Ids start at 1; an id of 0 is treated like 1 rather than underflowing.
pub fn title_for(id: ItemId) -> &'static str {
    let slot = id.saturating_sub(1) % TITLE_BANK.len() as u64;
    TITLE_BANK[slot as usize]
}
