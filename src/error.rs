//! Error type shared by problem construction and all search runners.

use std::fmt;

/// Errors raised when building a routing problem or starting a search.
///
/// Search itself never fails once started: every acceptance decision is a
/// probabilistic choice, not error recovery. Failures are limited to
/// malformed input and degenerate configuration, both rejected at entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// A vehicle was given no candidate paths.
    EmptyCandidates {
        /// Index of the offending vehicle.
        vehicle: usize,
    },
    /// A candidate path contains no nodes.
    EmptyPath { vehicle: usize, candidate: usize },
    /// A candidate path does not begin at the vehicle's start node.
    StartMismatch {
        vehicle: usize,
        candidate: usize,
        expected: String,
        found: String,
    },
    /// A candidate path does not end at the vehicle's goal (strict policy only).
    GoalMismatch {
        vehicle: usize,
        candidate: usize,
        expected: String,
        found: String,
    },
    /// A candidate path steps across a pair of nodes with no road between them.
    UnknownRoad {
        vehicle: usize,
        candidate: usize,
        from: String,
        to: String,
    },
    /// A strategy configuration failed validation.
    InvalidConfig(String),
    /// Exhaustive enumeration would exceed its configured bound.
    SearchSpaceTooLarge {
        /// Number of joint assignments the product would enumerate.
        combinations: u128,
        /// Configured upper bound.
        limit: u128,
    },
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::EmptyCandidates { vehicle } => {
                write!(f, "vehicle {vehicle} has no candidate paths")
            }
            RoutingError::EmptyPath { vehicle, candidate } => {
                write!(f, "vehicle {vehicle}: candidate {candidate} is empty")
            }
            RoutingError::StartMismatch {
                vehicle,
                candidate,
                expected,
                found,
            } => write!(
                f,
                "vehicle {vehicle}: candidate {candidate} starts at {found}, expected {expected}"
            ),
            RoutingError::GoalMismatch {
                vehicle,
                candidate,
                expected,
                found,
            } => write!(
                f,
                "vehicle {vehicle}: candidate {candidate} ends at {found}, expected {expected}"
            ),
            RoutingError::UnknownRoad {
                vehicle,
                candidate,
                from,
                to,
            } => write!(
                f,
                "vehicle {vehicle}: candidate {candidate} uses missing road {from} -> {to}"
            ),
            RoutingError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            RoutingError::SearchSpaceTooLarge { combinations, limit } => write!(
                f,
                "search space of {combinations} assignments exceeds limit {limit}"
            ),
        }
    }
}

impl std::error::Error for RoutingError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;
