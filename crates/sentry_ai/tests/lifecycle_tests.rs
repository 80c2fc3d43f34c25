//! Construction, validation and subscription lifetime

mod common;

use common::*;
use sentry_ai::prelude::*;

#[test]
fn test_missing_navigator_fails() {
    let bus = EventBus::new();
    let result = Agent::builder(AgentConfig::guard(Vec2::ZERO)).listen(&bus).build();
    assert!(matches!(result, Err(AgentError::MissingCollaborator("navigator"))));
}

#[test]
fn test_missing_subscription_fails() {
    let result = Agent::builder(AgentConfig::guard(Vec2::ZERO))
        .navigator(StraightLineNavigator::new(Vec2::ZERO))
        .build();
    assert!(matches!(result, Err(AgentError::MissingCollaborator(_))));
}

#[test]
fn test_invalid_config_rejected() {
    let bus = EventBus::new();
    let config = AgentConfig::patrol(Vec2::ZERO, Vec2::X).with_search(8.0, 10.0, 0.0);
    let result = Agent::builder(config)
        .navigator(StraightLineNavigator::new(Vec2::ZERO))
        .listen(&bus)
        .build();

    match result {
        Err(AgentError::InvalidConfig(err)) => assert_eq!(err.field(), Some("search_interval")),
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn test_drop_unsubscribes() {
    let bus = EventBus::new();
    let agent = build(AgentConfig::guard(Vec2::ZERO), Vec2::ZERO, &bus);
    let other = build(AgentConfig::guard(Vec2::ONE), Vec2::ONE, &bus);
    assert_eq!(bus.subscriber_count::<TargetMoved>(), 2);

    drop(agent);
    assert_eq!(bus.subscriber_count::<TargetMoved>(), 1);
    drop(other);
    assert_eq!(bus.subscriber_count::<TargetMoved>(), 0);
    assert_eq!(bus.publish(TargetMoved { position: Vec2::ZERO }), 0);
}

#[test]
fn test_initial_state_per_role() {
    let bus = EventBus::new();
    let patrol = build(AgentConfig::patrol(Vec2::ZERO, Vec2::X), Vec2::ZERO, &bus);
    let guard = build(AgentConfig::guard(Vec2::ZERO), Vec2::ZERO, &bus);

    assert_eq!(patrol.state(), BehaviorState::Patrol);
    assert_eq!(patrol.facing(), Facing::Left);
    assert_eq!(patrol.presentation().debug.attack_radius, None);

    assert_eq!(guard.state(), BehaviorState::Guard);
    assert_eq!(guard.facing(), Facing::Right);
    assert_eq!(guard.presentation().debug.attack_radius, Some(4.0));
    assert_eq!(guard.presentation().debug.hearing_radius, 6.0);
}

#[test]
fn test_snapshot_reflects_runtime_state() {
    let bus = EventBus::new();
    let mut agent = build(AgentConfig::guard(Vec2::ZERO), Vec2::ZERO, &bus);
    let scene = TestScene::new(nowhere());
    let effects = EffectLog::new();

    bus.publish(TargetMoved { position: Vec2::new(1.0, 1.0) });
    tick(&mut agent, &scene, &effects);

    let snapshot = agent.snapshot();
    assert_eq!(snapshot.id, 1);
    assert_eq!(snapshot.tick, 1);
    assert_eq!(snapshot.state, BehaviorState::Warning);
    assert!(snapshot.show_alert);
    assert_eq!(snapshot.heard_target, Some(Vec2::new(1.0, 1.0)));
    assert_eq!(snapshot.task, Some(TaskKind::Alert));
    assert_eq!(snapshot.can_attack, Some(true));
}
