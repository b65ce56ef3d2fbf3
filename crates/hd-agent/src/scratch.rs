//! Per-primitive private memory.
//!
//! An agent runs at most one stateful movement primitive at a time, so its
//! context holds a single [`Scratch`] slot: a tagged union with one variant
//! per stateful primitive.  Asking for a variant the slot does not currently
//! hold replaces whatever was there with that variant's default, so
//! switching primitives always starts the new one from a clean state.
//!
//! ```rust
//! use hd_agent::{ChargeState, Scratch, ScratchSlot, ZigzagState};
//!
//! let mut slot = Scratch::Empty;
//! ChargeState::claim(&mut slot).windup_elapsed = 0.4;
//! assert_eq!(ChargeState::peek(&slot).map(|c| c.windup_elapsed), Some(0.4));
//!
//! // Switching primitive clears the charge memory.
//! ZigzagState::claim(&mut slot);
//! assert!(ChargeState::peek(&slot).is_none());
//! ```

use hd_core::Vec2;

/// Memory for the windup → execute → cooldown charge primitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChargeState {
    /// Straight-line direction captured at the start of windup.
    pub direction:         Vec2,
    /// Where the execute phase began.
    pub start:             Vec2,
    /// `true` once `direction` has been captured.
    pub aimed:             bool,
    /// Seconds spent winding up.
    pub windup_elapsed:    f32,
    /// `true` after windup has reported completion once.
    pub released:          bool,
    /// `true` once the execute phase has recorded `start`.
    pub launched:          bool,
    /// Seconds spent in cooldown.
    pub cooldown_elapsed:  f32,
}

/// Memory for the drift / pulse wander primitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriftState {
    /// Current wander heading (unit length once initialised).
    pub direction:     Vec2,
    /// Seconds until the wander heading is re-rolled.
    pub reroll_in:     f32,
    /// Seconds since the last pulse ended.
    pub since_pulse:   f32,
    /// `true` while a pulse dash is in progress.
    pub pulsing:       bool,
    /// Seconds into the current pulse.
    pub pulse_elapsed: f32,
    /// Where the current pulse started.
    pub pulse_start:   Vec2,
}

/// Memory for pack formation movement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormationState {
    /// Last slot position the agent steered to.
    pub slot:   Vec2,
    /// `true` while the agent is within the formed tolerance of its slot.
    pub formed: bool,
}

/// Memory for zigzag chasing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZigzagState {
    /// Phase accumulator: advances by `dt * frequency` per frame.
    pub timer: f32,
}

/// The single scratch slot carried by every agent context.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Scratch {
    #[default]
    Empty,
    Charge(ChargeState),
    Drift(DriftState),
    Formation(FormationState),
    Zigzag(ZigzagState),
}

impl Scratch {
    /// Label of the active variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Scratch::Empty        => "empty",
            Scratch::Charge(_)    => "charge",
            Scratch::Drift(_)     => "drift",
            Scratch::Formation(_) => "formation",
            Scratch::Zigzag(_)    => "zigzag",
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Scratch::Empty)
    }
}

/// A state struct that occupies one [`Scratch`] variant.
pub trait ScratchSlot: Default + Sized {
    /// Borrow this variant from `slot`, resetting the slot to a fresh default
    /// of this variant if it currently holds anything else.
    fn claim(slot: &mut Scratch) -> &mut Self;

    /// Borrow this variant if the slot currently holds it.
    fn peek(slot: &Scratch) -> Option<&Self>;
}

macro_rules! scratch_slot {
    ($ty:ty => $variant:ident) => {
        impl ScratchSlot for $ty {
            fn claim(slot: &mut Scratch) -> &mut Self {
                if !matches!(slot, Scratch::$variant(_)) {
                    *slot = Scratch::$variant(<$ty>::default());
                }
                match slot {
                    Scratch::$variant(state) => state,
                    _ => unreachable!("scratch slot was reset to this variant above"),
                }
            }

            fn peek(slot: &Scratch) -> Option<&Self> {
                match slot {
                    Scratch::$variant(state) => Some(state),
                    _ => None,
                }
            }
        }
    };
}

scratch_slot!(ChargeState    => Charge);
scratch_slot!(DriftState     => Drift);
scratch_slot!(FormationState => Formation);
scratch_slot!(ZigzagState    => Zigzag);
