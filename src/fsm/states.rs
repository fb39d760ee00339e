//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!  IDLE ──[rising]──▶ AWAITING_DIP ──[falling]──▶ AWAITING_CONFIRM
//!    ▲                     │                            │
//!    │             [fallback deadline]            [rising]  [deadline]
//!    │                     ▼                            ▼       │
//!    ├──────[falling]──── ON ◀──────────────────────────┘       │
//!    │                                                          │
//!    └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The preamp's documented power-up behaviour is high → low → high;
//! AWAITING_DIP tolerates it, and its deadline is the stuck-high fallback —
//! if the input never falls, the source is not doing the double-pulse
//! pattern, so the output turns on directly rather than waiting forever.
//! AWAITING_CONFIRM's deadline handles an intermediate low period with no
//! following rise; giving up and returning to IDLE keeps the channel from
//! getting stuck off. ON ignores further rises and treats any fall as a
//! full re-arm: the contract is level-driven, not edge-counted.

use super::context::ChannelContext;
use super::{StateDescriptor, StateId};
use crate::edge::Edge;
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once per channel at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — AwaitingDip
        StateDescriptor {
            id: StateId::AwaitingDip,
            name: "AwaitingDip",
            on_enter: Some(awaiting_dip_enter),
            on_exit: Some(disarm_on_exit),
            on_update: awaiting_dip_update,
        },
        // Index 2 — AwaitingConfirm
        StateDescriptor {
            id: StateId::AwaitingConfirm,
            name: "AwaitingConfirm",
            on_enter: Some(awaiting_confirm_enter),
            on_exit: Some(disarm_on_exit),
            on_update: awaiting_confirm_update,
        },
        // Index 3 — On
        StateDescriptor {
            id: StateId::On,
            name: "On",
            on_enter: None,
            on_exit: None,
            on_update: on_update,
        },
    ]
}

/// Shared exit action: a state leaves no timer behind.
fn disarm_on_exit(ctx: &mut ChannelContext) {
    ctx.disarm();
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE — input low, waiting for the first rise
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut ChannelContext) -> Option<StateId> {
    match ctx.edge {
        Edge::Rising => Some(StateId::AwaitingDip),
        // Falling while idle means the line was high before we were; the
        // machine is level-driven, nothing to do.
        Edge::Falling | Edge::None => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  AWAITING_DIP — first rise seen, expecting the re-initialisation dip
// ═══════════════════════════════════════════════════════════════════════════

fn awaiting_dip_enter(ctx: &mut ChannelContext) {
    let window = ctx.config.fallback_window_secs();
    ctx.arm_secs(window);
    info!("trigger rose — holding output, expecting dip within {window}s");
}

fn awaiting_dip_update(ctx: &mut ChannelContext) -> Option<StateId> {
    match ctx.edge {
        // The dip: the preamp has gotten around to re-initialising its
        // triggers. Move on to wait for the confirming rise.
        Edge::Falling => Some(StateId::AwaitingConfirm),
        // Already high — a repeated rise carries no information.
        Edge::Rising => None,
        Edge::None => {
            if ctx.deadline_elapsed() {
                // Input stayed high the whole window: single-pulse source.
                info!("no dip seen — turning output on (stuck-high fallback)");
                Some(StateId::On)
            } else {
                None
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  AWAITING_CONFIRM — dip seen, waiting for the second rise
// ═══════════════════════════════════════════════════════════════════════════

fn awaiting_confirm_enter(ctx: &mut ChannelContext) {
    let window = ctx.config.second_rise_window_secs;
    ctx.arm_secs(window);
    info!("dip seen — armed, expecting second rise within {window}s");
}

fn awaiting_confirm_update(ctx: &mut ChannelContext) -> Option<StateId> {
    match ctx.edge {
        // The confirming rise — turn on.
        Edge::Rising => Some(StateId::On),
        // Already low.
        Edge::Falling => None,
        Edge::None => {
            if ctx.deadline_elapsed() {
                // Spurious single dip with no following rise. Restart
                // detection from scratch.
                info!("second rise never came — resetting to idle");
                Some(StateId::Idle)
            } else {
                None
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ON — output high, tracking the input level
// ═══════════════════════════════════════════════════════════════════════════

fn on_update(ctx: &mut ChannelContext) -> Option<StateId> {
    match ctx.edge {
        // Input dropped: forget history, treat the next high as fresh.
        Edge::Falling => {
            info!("trigger dropped — output off, re-arming detection");
            Some(StateId::Idle)
        }
        Edge::Rising | Edge::None => None,
    }
}
