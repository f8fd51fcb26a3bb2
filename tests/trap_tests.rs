//! Trap window integration tests.
//!
//! Covers the three trap policies, trap eligibility timing, every trap
//! trigger kind and the reentrance guard of `MatchHandle`.

use std::cell::RefCell;
use std::rc::Rc;

use duel_kernel::cards::catalog::{ids, standard_registry};
use duel_kernel::core::{Action, ActionError, AttackTarget, MatchConfig, SideId, TrapPolicy};
use duel_kernel::games::duel::{Match, MatchBuilder, MatchHandle, MatchView, TrapDecision, TrapResponder};
use duel_kernel::triggers::{Event, TrapWindow, TriggerKind};
use duel_kernel::TemplateId;

const A: SideId = SideId::A;
const B: SideId = SideId::B;

fn builder(deck_a: Vec<TemplateId>, deck_b: Vec<TemplateId>, policy: TrapPolicy) -> MatchBuilder {
    MatchBuilder::new(standard_registry().unwrap())
        .seed(5)
        .deck(A, deck_a)
        .deck(B, deck_b)
        .config(MatchConfig::default().unshuffled().with_trap_policy(policy))
}

fn act(game: &mut Match, side: SideId, action: Action) -> Vec<Event> {
    game.apply(side, &action)
        .unwrap_or_else(|err| panic!("{:?} by side {} rejected: {}", action, side, err))
}

fn end_turn(game: &mut Match, side: SideId) -> Vec<Event> {
    let mut events = Vec::new();
    while game.active() == side && game.result().is_none() {
        events.extend(act(game, side, Action::AdvancePhase));
    }
    events
}

fn deck_with(front: &[TemplateId], filler: TemplateId) -> Vec<TemplateId> {
    let mut deck = front.to_vec();
    deck.extend(vec![filler; 12]);
    deck
}

/// A summons an Ember Drake on turn 1; B sets `traps` into slots 0.. on
/// its turn 1. Leaves A in its turn 2 battle phase.
fn attack_setup(traps: &[TemplateId], policy: TrapPolicy) -> Match {
    let mut game = builder(
        vec![ids::EMBER_DRAKE; 12],
        deck_with(traps, ids::DAWN_ACOLYTE),
        policy,
    )
    .build()
    .unwrap();

    act(&mut game, A, Action::AdvancePhase);
    act(&mut game, A, Action::NormalSummon { hand_idx: 0, slot: 0 });
    end_turn(&mut game, A);

    act(&mut game, B, Action::AdvancePhase);
    for slot in 0..traps.len() {
        act(&mut game, B, Action::Set { hand_idx: 0, slot });
    }
    end_turn(&mut game, B);

    act(&mut game, A, Action::AdvancePhase);
    act(&mut game, A, Action::AdvancePhase);
    game
}

fn direct() -> Action {
    Action::DeclareAttack {
        attacker_slot: 0,
        target: AttackTarget::Direct,
    }
}

fn names(events: &[Event]) -> Vec<&'static str> {
    events.iter().map(Event::name).collect()
}

// ============================================================================
// Manual policy
// ============================================================================

/// Test declining lets the attack resolve.
#[test]
fn test_decline_resumes_attack() {
    let mut game = attack_setup(&[ids::MIRROR_BARRIER], TrapPolicy::Manual);
    act(&mut game, A, direct());
    assert!(game.pending().is_some());

    let events = act(&mut game, B, Action::DeclineTraps);

    assert_eq!(names(&events), vec!["Attacked", "LifeChanged"]);
    assert_eq!(game.life(B), 6500);
    assert!(game.state().sides[B].zones.spell_trap(0).is_some());
    assert!(game.pending().is_none());
}

/// Test trap responses are rejected without an open window.
#[test]
fn test_no_trap_window() {
    let mut game = attack_setup(&[ids::MIRROR_BARRIER], TrapPolicy::Manual);

    assert_eq!(game.apply(B, &Action::DeclineTraps), Err(ActionError::NoTrapWindow));
    assert_eq!(
        game.apply(B, &Action::ActivateTrap { slot: 0 }),
        Err(ActionError::NoTrapWindow)
    );
}

/// Test only offered slots can be activated.
#[test]
fn test_activate_unoffered_slot() {
    let mut game = attack_setup(&[ids::MIRROR_BARRIER], TrapPolicy::Manual);
    act(&mut game, A, direct());

    assert_eq!(
        game.apply(B, &Action::ActivateTrap { slot: 3 }),
        Err(ActionError::TrapNotEligible(3))
    );
    assert!(game.pending().is_some());
    assert_eq!(game.legal_actions(B), vec![Action::ActivateTrap { slot: 0 }, Action::DeclineTraps]);
    assert!(game.legal_actions(A).is_empty());
}

/// Test a negated attacker may attack again.
#[test]
fn test_negate_does_not_use_attack() {
    let mut game = attack_setup(&[ids::SEALING_VEIL], TrapPolicy::Manual);
    act(&mut game, A, direct());
    let events = act(&mut game, B, Action::ActivateTrap { slot: 0 });

    assert_eq!(
        names(&events),
        vec!["TrapActivated", "EffectApplied", "TrapNegatedAttack"]
    );
    assert_eq!(game.life(B), 8000);
    assert!(!game.state().sides[A].zones.monster(0).unwrap().attacked_this_turn);

    let events = act(&mut game, A, direct());
    assert_eq!(names(&events), vec!["Attacked", "LifeChanged"]);
    assert_eq!(game.life(B), 6500);
}

/// Test spiked mirror negates and reflects half the attacker's ATK.
#[test]
fn test_spiked_mirror() {
    let mut game = attack_setup(&[ids::SPIKED_MIRROR], TrapPolicy::Manual);
    act(&mut game, A, direct());
    let events = act(&mut game, B, Action::ActivateTrap { slot: 0 });

    assert!(events.contains(&Event::LifeChanged {
        side: A,
        delta: -750,
        life: 7250
    }));
    assert!(matches!(events.last(), Some(Event::TrapNegatedAttack { side: SideId::B, .. })));
    assert_eq!(game.life(B), 8000);
    assert!(game.state().sides[A].zones.monster(0).is_some());
}

/// Test damage windows and re-offers after an activation.
#[test]
fn test_retribution_on_damage() {
    let mut game = attack_setup(&[ids::RETRIBUTION, ids::RETRIBUTION], TrapPolicy::Manual);

    let events = act(&mut game, A, direct());
    assert_eq!(names(&events), vec!["Attacked", "LifeChanged", "TrapOffered"]);
    assert!(matches!(
        events.last(),
        Some(Event::TrapOffered { side: SideId::B, trigger: TriggerKind::OnDamage, slots }) if slots.as_slice() == [0, 1]
    ));

    let events = act(&mut game, B, Action::ActivateTrap { slot: 1 });
    assert!(events.contains(&Event::LifeChanged {
        side: A,
        delta: -750,
        life: 7250
    }));
    assert!(matches!(
        events.last(),
        Some(Event::TrapOffered { slots, .. }) if slots.as_slice() == [0]
    ));

    let events = act(&mut game, B, Action::DeclineTraps);
    assert!(events.is_empty());
    assert!(game.pending().is_none());
    assert!(game.state().sides[B].zones.spell_trap(0).is_some());
}

/// Test the summon window and the pitfall ATK threshold.
#[test]
fn test_pitfall_threshold() {
    let mut game = builder(
        deck_with(&[ids::GALE_FALCON, ids::EMBER_DRAKE], ids::TIDE_SERPENT),
        deck_with(&[ids::PITFALL, ids::PITFALL], ids::DAWN_ACOLYTE),
        TrapPolicy::Manual,
    )
    .build()
    .unwrap();

    end_turn(&mut game, A);
    act(&mut game, B, Action::AdvancePhase);
    act(&mut game, B, Action::Set { hand_idx: 0, slot: 0 });
    act(&mut game, B, Action::Set { hand_idx: 0, slot: 1 });
    end_turn(&mut game, B);

    act(&mut game, A, Action::AdvancePhase);
    let events = act(&mut game, A, Action::NormalSummon { hand_idx: 0, slot: 0 });
    assert_eq!(names(&events), vec!["Summoned", "TrapOffered"]);

    // Gale Falcon is below the threshold and survives.
    let events = act(&mut game, B, Action::ActivateTrap { slot: 0 });
    assert!(!names(&events).contains(&"MonsterDestroyed"));
    assert!(game.state().sides[A].zones.monster(0).is_some());
    act(&mut game, B, Action::DeclineTraps);

    end_turn(&mut game, A);
    end_turn(&mut game, B);

    act(&mut game, A, Action::AdvancePhase);
    let drake = game.state().sides[A]
        .zones
        .hand()
        .iter()
        .position(|c| c.template == ids::EMBER_DRAKE)
        .unwrap();
    act(&mut game, A, Action::NormalSummon { hand_idx: drake, slot: 1 });
    let events = act(&mut game, B, Action::ActivateTrap { slot: 1 });

    assert!(names(&events).contains(&"MonsterDestroyed"));
    assert!(game.state().sides[A].zones.monster(1).is_none());
    assert!(game.pending().is_none());
}

/// Test enemy-turn-start traps block the new turn until answered.
#[test]
fn test_ambush_on_enemy_turn_start() {
    let mut game = builder(
        vec![ids::EMBER_DRAKE; 12],
        deck_with(&[ids::AMBUSH], ids::DAWN_ACOLYTE),
        TrapPolicy::Manual,
    )
    .build()
    .unwrap();

    end_turn(&mut game, A);
    act(&mut game, B, Action::AdvancePhase);
    act(&mut game, B, Action::Set { hand_idx: 0, slot: 2 });
    let events = end_turn(&mut game, B);

    assert!(matches!(
        events.last(),
        Some(Event::TrapOffered { side: SideId::B, trigger: TriggerKind::OnEnemyTurnStart, .. })
    ));
    assert_eq!(game.active(), A);
    assert_eq!(game.apply(A, &Action::AdvancePhase), Err(ActionError::TrapWindowPending));

    act(&mut game, B, Action::ActivateTrap { slot: 2 });
    assert_eq!(game.life(A), 7700);
    act(&mut game, A, Action::AdvancePhase);
}

/// Test traps are not eligible on the turn they were set.
#[test]
fn test_manual_trap_timing() {
    let mut game = builder(
        vec![ids::EMBER_DRAKE; 12],
        deck_with(&[ids::DETONATOR], ids::DAWN_ACOLYTE),
        TrapPolicy::Manual,
    )
    .build()
    .unwrap();

    end_turn(&mut game, A);
    act(&mut game, B, Action::AdvancePhase);
    act(&mut game, B, Action::Set { hand_idx: 0, slot: 4 });
    assert_eq!(
        game.apply(B, &Action::ActivateSetSpell { slot: 4 }),
        Err(ActionError::TrapNotEligible(4))
    );
    end_turn(&mut game, B);
    end_turn(&mut game, A);

    act(&mut game, B, Action::AdvancePhase);
    let events = act(&mut game, B, Action::ActivateSetSpell { slot: 4 });

    assert_eq!(
        names(&events),
        vec!["TrapActivated", "EffectApplied", "LifeChanged"]
    );
    assert_eq!(game.life(A), 7500);
    assert!(game.state().sides[B].zones.spell_trap(4).is_none());
}

/// Test event-triggered traps cannot be activated by hand.
#[test]
fn test_triggered_trap_not_manual() {
    let mut game = builder(
        vec![ids::EMBER_DRAKE; 12],
        deck_with(&[ids::MIRROR_BARRIER], ids::DAWN_ACOLYTE),
        TrapPolicy::Manual,
    )
    .build()
    .unwrap();

    end_turn(&mut game, A);
    act(&mut game, B, Action::AdvancePhase);
    act(&mut game, B, Action::Set { hand_idx: 0, slot: 0 });
    end_turn(&mut game, B);
    end_turn(&mut game, A);

    act(&mut game, B, Action::AdvancePhase);
    assert_eq!(
        game.apply(B, &Action::ActivateSetSpell { slot: 0 }),
        Err(ActionError::TrapNotEligible(0))
    );
}

// ============================================================================
// AutoActivate policy
// ============================================================================

/// Test auto-activation resolves the window before the action returns.
#[test]
fn test_auto_activate_negates() {
    let mut game = attack_setup(&[ids::SEALING_VEIL, ids::MIRROR_BARRIER], TrapPolicy::AutoActivate);
    let events = act(&mut game, A, direct());

    // Slot 0 negates; slot 1 is left for a later attack.
    assert_eq!(
        names(&events),
        vec!["TrapOffered", "TrapActivated", "EffectApplied", "TrapNegatedAttack"]
    );
    assert!(game.pending().is_none());
    assert!(game.state().sides[B].zones.spell_trap(0).is_none());
    assert!(game.state().sides[B].zones.spell_trap(1).is_some());
}

/// Test auto-activated damage traps fire in slot order.
#[test]
fn test_auto_activate_fires_all() {
    let mut game = attack_setup(&[ids::RETRIBUTION, ids::RETRIBUTION], TrapPolicy::AutoActivate);
    act(&mut game, A, direct());

    assert_eq!(game.life(B), 6500);
    assert_eq!(game.life(A), 8000 - 750 - 750);
    assert!(game.state().sides[B].zones.spell_traps().iter().all(Option::is_none));
}

// ============================================================================
// Responder policy
// ============================================================================

struct Scripted {
    decisions: Vec<TrapDecision>,
    seen: Rc<RefCell<Vec<TriggerKind>>>,
}

impl TrapResponder for Scripted {
    fn respond(&mut self, view: &MatchView, window: &TrapWindow) -> TrapDecision {
        assert_eq!(view.viewer, window.owner);
        self.seen.borrow_mut().push(window.trigger);
        if self.decisions.is_empty() {
            TrapDecision::Decline
        } else {
            self.decisions.remove(0)
        }
    }
}

fn handle_setup(traps: &[TemplateId]) -> MatchHandle {
    let game = attack_setup(traps, TrapPolicy::Responder);
    MatchHandle::new(game)
}

/// Test the responder answers windows opened through the handle.
#[test]
fn test_responder_activates() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let handle = handle_setup(&[ids::MIRROR_BARRIER]).with_responder(Scripted {
        decisions: vec![TrapDecision::Activate(0)],
        seen: Rc::clone(&seen),
    });

    let events = handle.apply(A, &direct()).unwrap();

    assert_eq!(
        names(&events),
        vec!["TrapOffered", "TrapActivated", "EffectApplied", "MonsterDestroyed", "TrapNegatedAttack"]
    );
    assert_eq!(*seen.borrow(), vec![TriggerKind::OnAttack]);
    assert!(handle.with(|game| game.pending().is_none()).unwrap());
}

/// Test a rejected decision falls back to declining.
#[test]
fn test_invalid_decision_declines() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let handle = handle_setup(&[ids::MIRROR_BARRIER]).with_responder(Scripted {
        decisions: vec![TrapDecision::Activate(4)],
        seen: Rc::clone(&seen),
    });

    let events = handle.apply(A, &direct()).unwrap();

    assert_eq!(names(&events), vec!["TrapOffered", "Attacked", "LifeChanged"]);
    assert_eq!(handle.with(|game| game.life(B)).unwrap(), 6500);
}

/// Test without a responder the window stays open on the handle.
#[test]
fn test_handle_without_responder_parks_window() {
    let handle = handle_setup(&[ids::MIRROR_BARRIER]);
    handle.apply(A, &direct()).unwrap();

    assert_eq!(handle.apply(A, &Action::AdvancePhase), Err(ActionError::TrapWindowPending));
    let view = handle.view(B).unwrap();
    assert_eq!(view.trap_window.as_ref().and_then(|w| w.eligible.clone()).map(|e| e.to_vec()), Some(vec![0]));
    assert_eq!(handle.view(A).unwrap().trap_window.map(|w| w.eligible), Some(None));

    handle.apply(B, &Action::DeclineTraps).unwrap();
    assert_eq!(handle.result().unwrap(), None);
}

struct Reentering {
    handle: MatchHandle,
    errors: Rc<RefCell<Vec<ActionError>>>,
}

impl TrapResponder for Reentering {
    fn respond(&mut self, _view: &MatchView, _window: &TrapWindow) -> TrapDecision {
        let mut errors = self.errors.borrow_mut();
        if let Err(err) = self.handle.apply(SideId::B, &Action::DeclineTraps) {
            errors.push(err);
        }
        if let Err(err) = self.handle.view(SideId::B) {
            errors.push(err);
        }
        TrapDecision::Activate(0)
    }
}

/// Test submitting from inside a responder is rejected.
#[test]
fn test_reentrant_submission_rejected() {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let handle = handle_setup(&[ids::MIRROR_BARRIER]);
    let inner = handle.clone();
    let handle = handle.with_responder(Reentering {
        handle: inner,
        errors: Rc::clone(&errors),
    });

    let events = handle.apply(A, &direct()).unwrap();

    assert_eq!(*errors.borrow(), vec![ActionError::Reentrant, ActionError::Reentrant]);
    assert!(names(&events).contains(&"TrapNegatedAttack"));
    let snapshot = handle.snapshot().unwrap();
    assert!(snapshot.state().sides[A].zones.monster(0).is_none());
}
