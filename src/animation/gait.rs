//! Diagonal gait sequencing for four leg steppers.
//!
//! The scheduler is a resumable two-phase loop advanced once per frame:
//!
//! 1. Trigger front-left + back-right, then keep re-triggering them every
//!    frame until neither is stepping.
//! 2. Same for front-right + back-left.
//!
//! Only the pair of the current phase is ever triggered, so at most one
//! diagonal is in flight. The enable flag is checked at the top of each
//! cycle; while disabled the scheduler waits without losing state.

/// Leg slots, in the order the controller stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegId {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl LegId {
    pub const ALL: [LegId; 4] = [
        LegId::FrontLeft,
        LegId::FrontRight,
        LegId::BackLeft,
        LegId::BackRight,
    ];

    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LegId::FrontLeft => "FL",
            LegId::FrontRight => "FR",
            LegId::BackLeft => "BL",
            LegId::BackRight => "BR",
        }
    }

    #[must_use]
    pub fn diagonal(self) -> Diagonal {
        match self {
            LegId::FrontLeft | LegId::BackRight => Diagonal::FrontLeftBackRight,
            LegId::FrontRight | LegId::BackLeft => Diagonal::FrontRightBackLeft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    FrontLeftBackRight,
    FrontRightBackLeft,
}

impl Diagonal {
    #[must_use]
    pub fn legs(self) -> [LegId; 2] {
        match self {
            Diagonal::FrontLeftBackRight => [LegId::FrontLeft, LegId::BackRight],
            Diagonal::FrontRightBackLeft => [LegId::FrontRight, LegId::BackLeft],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaitPhase {
    /// At the top of the cycle, waiting for stepping to be enabled.
    #[default]
    Waiting,
    Stepping(Diagonal),
}

#[derive(Debug, Clone, Default)]
pub struct GaitScheduler {
    phase: GaitPhase,
}

impl GaitScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> GaitPhase {
        self.phase
    }

    /// Advances one frame and returns the pair of legs to trigger this frame.
    ///
    /// `is_moving` reports whether a leg is currently mid-step.
    pub fn tick(&mut self, enabled: bool, is_moving: impl Fn(LegId) -> bool) -> Option<[LegId; 2]> {
        loop {
            match self.phase {
                GaitPhase::Waiting => {
                    if !enabled {
                        return None;
                    }
                    let first = Diagonal::FrontLeftBackRight;
                    self.phase = GaitPhase::Stepping(first);
                    return Some(first.legs());
                }
                GaitPhase::Stepping(diagonal) => {
                    let legs = diagonal.legs();
                    if legs.iter().any(|&leg| is_moving(leg)) {
                        return Some(legs);
                    }
                    match diagonal {
                        Diagonal::FrontLeftBackRight => {
                            let next = Diagonal::FrontRightBackLeft;
                            self.phase = GaitPhase::Stepping(next);
                            return Some(next.legs());
                        }
                        Diagonal::FrontRightBackLeft => {
                            self.phase = GaitPhase::Waiting;
                        }
                    }
                }
            }
        }
    }
}
