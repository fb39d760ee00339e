//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                    │
//! │  ┌─────────────────┬───────────┬──────────┬───────────────────┐│
//! │  │ StateId         │ on_enter  │ on_exit  │ on_update         ││
//! │  ├─────────────────┼───────────┼──────────┼───────────────────┤│
//! │  │ Idle            │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> ││
//! │  │ AwaitingDip     │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> ││
//! │  │ AwaitingConfirm │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> ││
//! │  │ On              │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> ││
//! │  └─────────────────┴───────────┴──────────┴───────────────────┘│
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state. If it
//! returns `Some(next_id)`, the engine runs `on_exit` for the current state,
//! then `on_enter` for the next, and updates the current pointer. All
//! functions receive `&mut ChannelContext`, which holds the edge sampled
//! this tick, the monotonic time, the timeout config, and the armed deadline.
//!
//! Deadlines are armed by `on_enter` handlers and disarmed by `on_exit`
//! handlers, so at most one deadline exists per machine at any instant.

pub mod context;
pub mod states;

use context::ChannelContext;
use log::debug;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of the trigger channel states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Input low, output low, waiting for the first rise.
    Idle = 0,
    /// First rise seen; waiting for the re-initialisation dip.
    AwaitingDip = 1,
    /// Dip seen; waiting for the confirming second rise.
    AwaitingConfirm = 2,
    /// Confirmed (or fallback fired); output high.
    On = 3,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert a `usize` index back to `StateId`. Panics on out-of-range in
    /// debug builds; returns `Idle` in release (output-low fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::AwaitingDip,
            2 => Self::AwaitingConfirm,
            3 => Self::On,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }

    /// The output level this state drives. The output is a pure function of
    /// the state: `On` ⇒ high, everything else ⇒ low.
    pub const fn output_high(self) -> bool {
        matches!(self, Self::On)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut ChannelContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut ChannelContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine for one trigger channel.
///
/// Owns the state table (array of [`StateDescriptor`]) and nothing else;
/// the mutable [`ChannelContext`] is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut ChannelContext) {
        debug!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// The caller sets `ctx.edge` and `ctx.now_ms` first. If `on_update`
    /// returns `Some(next)`, the transition executes:
    /// `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut ChannelContext) {
        let next = (self.table[self.current].on_update)(ctx);
        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Force an immediate transition (used to seed the initial state when
    /// the input is already high at startup).
    pub fn force_transition(&mut self, next: StateId, ctx: &mut ChannelContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// The output level for the current state.
    pub fn output_high(&self) -> bool {
        self.current_state().output_high()
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut ChannelContext) {
        let next_idx = next_id as usize;

        debug!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
