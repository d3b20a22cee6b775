//! Behaviour tests for weapons that unfold before firing, using rust-rspec.

use hostile::attack::{AttackConfig, GateDecision, MovementEdge, OpenCloseGate, OpenCloseState};

#[derive(Clone, Debug, Default)]
struct Turret {
    gate: OpenCloseGate,
    decisions: Vec<GateDecision>,
    fired: Vec<AttackConfig>,
}

impl Turret {
    fn intend(&mut self) {
        let decision = self.gate.request_fire(AttackConfig::default());
        if let GateDecision::Fire(attack) = decision {
            self.fired.push(attack);
        }
        self.decisions.push(decision);
    }

    fn finish_opening(&mut self) {
        if let Some(attack) = self.gate.opening_complete() {
            self.fired.push(attack);
        }
    }

    fn start_moving(&mut self) {
        assert_eq!(self.gate.update_movement(true), Some(MovementEdge::Started));
    }
}

#[test]
fn gated_weapon_lifecycle() {
    rspec::run(&rspec::given("a closed, stationary turret", Turret::default(), |ctx| {
        ctx.then("it cannot fire yet", |turret| {
            assert_eq!(turret.gate.state(), OpenCloseState::Closed);
            assert!(!turret.gate.can_fire());
        });

        ctx.when("a fire intent arrives", |ctx| {
            ctx.before_each(|turret| turret.intend());

            ctx.then("it starts opening without firing", |turret| {
                assert_eq!(turret.gate.state(), OpenCloseState::Opening);
                assert_eq!(turret.decisions, vec![GateDecision::Deferred]);
                assert!(turret.fired.is_empty());
                assert!(turret.gate.pending().is_some());
            });

            ctx.when("the opening animation completes", |ctx| {
                ctx.before_each(|turret| turret.finish_opening());

                ctx.then("the pending request fires exactly once", |turret| {
                    assert_eq!(turret.fired.len(), 1);
                    assert_eq!(turret.gate.state(), OpenCloseState::Open);
                    assert!(turret.gate.pending().is_none());
                });

                ctx.when("another intent arrives", |ctx| {
                    ctx.before_each(|turret| turret.intend());

                    ctx.then("it fires immediately", |turret| {
                        assert_eq!(turret.fired.len(), 2);
                    });
                });
            });

            ctx.when("the carrier starts moving before the opening completes", |ctx| {
                ctx.before_each(|turret| {
                    turret.start_moving();
                    turret.finish_opening();
                });

                ctx.then("the pending request is dropped and the turret is closed", |turret| {
                    assert!(turret.fired.is_empty());
                    assert_eq!(turret.gate.state(), OpenCloseState::Closed);
                    assert!(turret.gate.pending().is_none());
                });
            });
        });

        ctx.when("the carrier is moving", |ctx| {
            ctx.before_each(|turret| {
                turret.start_moving();
                turret.intend();
            });

            ctx.then("fire intents are rejected", |turret| {
                assert_eq!(turret.decisions, vec![GateDecision::Rejected]);
                assert_eq!(turret.gate.state(), OpenCloseState::Closed);
                assert!(turret.gate.is_moving());
            });
        });
    }));
}
