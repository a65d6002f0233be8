//! Property-based invariant tests for the panel stack controller.
//!
//! These tests verify invariants that must hold for any sequence of calls:
//!
//! 1. The lock marker is engaged iff a panel is active, after every call.
//! 2. The trail never contains the active id.
//! 3. Calls naming unknown panels change nothing and emit nothing.
//! 4. Opening N distinct panels and closing N times unwinds in LIFO order.
//! 5. Trail depth never exceeds the number of successful opens.
//! 6. Escape closes exactly the active panel.

use proptest::prelude::*;
use pushbar_core::{
    Key, MemoryHost, PanelId, PanelStackController, PushbarConfig, Transition,
};

const PANELS: [&str; 4] = ["a", "b", "c", "d"];

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Open(usize),
    Close(usize),
    CloseActive,
    Escape,
    OpenUnknown,
    CloseUnknown,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..PANELS.len()).prop_map(Op::Open),
        (0..PANELS.len()).prop_map(Op::Close),
        Just(Op::CloseActive),
        Just(Op::Escape),
        Just(Op::OpenUnknown),
        Just(Op::CloseUnknown),
    ]
}

fn controller() -> PanelStackController<MemoryHost> {
    let mut host = MemoryHost::new();
    for panel in PANELS {
        host.add_panel(panel);
    }
    PanelStackController::new(host, PushbarConfig::default())
}

fn id(s: &str) -> PanelId {
    PanelId::new(s).unwrap()
}

fn apply(ctrl: &mut PanelStackController<MemoryHost>, op: &Op) -> Transition {
    match op {
        Op::Open(i) => ctrl.open(&id(PANELS[*i])),
        Op::Close(i) => ctrl.close(&id(PANELS[*i])),
        Op::CloseActive => ctrl.close_active(),
        Op::Escape => ctrl.key_up(&Key::Escape).transition,
        Op::OpenUnknown => ctrl.open(&id("missing")),
        Op::CloseUnknown => ctrl.close(&id("missing")),
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2. Lock mirrors activity; trail never holds the active id
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lock_and_trail_invariants_hold(ops in proptest::collection::vec(op(), 0..64)) {
        let mut ctrl = controller();
        for op in &ops {
            apply(&mut ctrl, op);
            prop_assert_eq!(ctrl.is_locked(), ctrl.active_id().is_some());
            prop_assert_eq!(ctrl.host().root_locked(), ctrl.is_locked());
            prop_assert_eq!(
                ctrl.host().root_active(),
                ctrl.active_id().map(PanelId::as_str)
            );
            if let Some(active) = ctrl.active_id() {
                prop_assert!(!ctrl.trail().contains(active), "trail holds active id after {:?}", op);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Unknown ids are no-ops
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unknown_ids_change_nothing(ops in proptest::collection::vec(op(), 0..32)) {
        let mut ctrl = controller();
        for op in &ops {
            apply(&mut ctrl, op);
        }
        let snapshot = ctrl.snapshot();
        let events = ctrl.host().events().len();
        let markers: Vec<_> = PANELS.iter().map(|p| ctrl.host().markers_of(p)).collect();

        prop_assert!(!apply(&mut ctrl, &Op::OpenUnknown).is_applied());
        prop_assert!(!apply(&mut ctrl, &Op::CloseUnknown).is_applied());

        prop_assert_eq!(ctrl.snapshot(), snapshot);
        prop_assert_eq!(ctrl.host().events().len(), events);
        let after: Vec<_> = PANELS.iter().map(|p| ctrl.host().markers_of(p)).collect();
        prop_assert_eq!(after, markers);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. LIFO unwind
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn distinct_opens_unwind_lifo(order in Just(vec![0usize, 1, 2, 3]).prop_shuffle()) {
        let mut ctrl = controller();
        for &i in &order {
            ctrl.open(&id(PANELS[i]));
        }
        let mut closed = Vec::new();
        for _ in 0..order.len() {
            match ctrl.close_active() {
                Transition::Closed { id, .. } => closed.push(id),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
        let expected: Vec<_> = order.iter().rev().map(|&i| id(PANELS[i])).collect();
        prop_assert_eq!(closed, expected);
        prop_assert!(!ctrl.is_locked());
        prop_assert_eq!(ctrl.host().root_active(), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Bounded trail growth
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn trail_depth_bounded_by_opens(ops in proptest::collection::vec(op(), 0..64)) {
        let mut ctrl = controller();
        let mut opens = 0usize;
        for op in &ops {
            if matches!(apply(&mut ctrl, op), Transition::Opened { .. }) {
                opens += 1;
            }
            prop_assert!(ctrl.trail().len() <= opens);
            prop_assert!(ctrl.trail().len() < PANELS.len());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Escape closes exactly the active panel
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn escape_closes_active(ops in proptest::collection::vec(op(), 0..32)) {
        let mut ctrl = controller();
        for op in &ops {
            apply(&mut ctrl, op);
        }
        let active = ctrl.active_id().cloned();
        let next = ctrl.trail().last().cloned();
        match (active, ctrl.key_up(&Key::Escape).transition) {
            (Some(active), Transition::Closed { id, restored }) => {
                prop_assert_eq!(id, active);
                prop_assert_eq!(restored, next);
            }
            (None, Transition::Ignored(_)) => {}
            (active, other) => prop_assert!(false, "active {:?} produced {:?}", active, other),
        }
    }
}
