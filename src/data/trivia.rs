//! Security trivia for the `trivia` command

use rand::seq::SliceRandom;
use rand::Rng;

pub const SECURITY_TRIVIA: &[&str] = &[
    "The first computer virus was created in 1986 and was called 'Brain'.",
    "The most common password is still '123456' despite years of security warnings.",
    "The term 'bug' in computing originated from an actual moth that was found in Harvard's Mark II computer in 1947.",
    "USB devices can be programmed to act as keyboards, making them dangerous attack vectors.",
    "Two-factor authentication can prevent 99.9% of automated attacks.",
    "The average cost of a data breach in 2023 is over $4.2 million.",
    "Phishing attacks account for more than 80% of reported security incidents.",
    "The first documented ransomware attack happened in 1989 and was distributed via floppy disks.",
    "Over 30% of data breaches involve internal actors within organizations.",
    "HTTPS doesn't mean a website is safe—it only means the connection is encrypted.",
];

/// Pick one fact uniformly at random
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SECURITY_TRIVIA.choose(rng).copied().unwrap_or(SECURITY_TRIVIA[0])
}
