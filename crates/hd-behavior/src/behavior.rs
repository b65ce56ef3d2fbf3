//! The `Behavior` trait — the contract every archetype state machine meets.

use hd_agent::{AgentContext, AnimFlag};
use hd_steer::set_moving;

use crate::{BehaviorResult, Services};

/// Displacement below this counts as standing still for the cosmetic pass.
const STILL_EPSILON: f32 = 1e-4;

/// One archetype's per-agent state machine.
///
/// The context is owned by the enclosing [`BehaviorInstance`]; a behavior
/// holds only its FSM state and config.  Every hook gets the context and
/// the shared services for the duration of the call.
///
/// [`BehaviorInstance`]: crate::BehaviorInstance
pub trait Behavior {
    /// Called once after the context is built and the target resolved.
    fn on_enter(&mut self, _ctx: &mut AgentContext, _svc: &mut Services<'_>) -> BehaviorResult<()> {
        Ok(())
    }

    /// Run one tick.  Should do exactly one of: respawn, attack, move.
    fn on_update(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>);

    /// Cosmetic pass after every agent has updated.  Must not change
    /// gameplay state.
    ///
    /// Default: keep the `Moving` flag honest with the actual displacement.
    fn on_late_update(&mut self, ctx: &mut AgentContext) {
        let moved = ctx.position.distance(ctx.last_position) > STILL_EPSILON;
        set_moving(ctx, moved && !ctx.flag(AnimFlag::Attacking));
    }

    /// Release every shared resource held (attack slot, pack membership).
    ///
    /// May be called more than once; releases are idempotent.
    fn on_exit(&mut self, ctx: &mut AgentContext, svc: &mut Services<'_>);

    /// Drop any committed attack and fall back to the neutral state,
    /// releasing the attack slot.  Used by modulators that take over
    /// movement for a while.  Default: nothing to drop.
    fn interrupt(&mut self, _ctx: &mut AgentContext, _svc: &mut Services<'_>) {}

    /// `true` while mid-commit (windup, charge, lunge).  Modulators never
    /// take over a committed agent.
    fn is_committed(&self) -> bool {
        false
    }

    /// `true` if the behavior wants to run while dead.
    fn reacts_to_death(&self) -> bool {
        false
    }
}
