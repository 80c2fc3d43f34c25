//! Integration tests for the simulation world

use sentry_ai::prelude::*;
use sentry_event::EventBus;
use sentry_sim::prelude::*;

const DT: f32 = 0.1;

fn open_world(target: Vec2) -> World {
    World::new(Scene::new(target, 0.3), target)
}

fn chaser_config() -> AgentConfig {
    AgentConfig::patrol(Vec2::ZERO, Vec2::new(0.0, 10.0)).with_initial_facing(Facing::Right)
}

#[test]
fn test_move_target_publishes_only_on_displacement() {
    let mut world = open_world(Vec2::new(-3.0, 0.0));
    world.spawn_agent(chaser_config(), Vec2::ZERO, 1).unwrap();

    assert!(!world.move_target(Vec2::new(-3.0, 0.0)));
    world.step(DT);
    let id = world.agents().next().unwrap().id();
    assert_eq!(world.agent(id).unwrap().state(), BehaviorState::Patrol);

    assert!(world.move_target(Vec2::new(-3.0, 0.1)));
    world.step(DT);
    assert_eq!(world.agent(id).unwrap().state(), BehaviorState::Warning);
    assert_eq!(world.agent(id).unwrap().heard_target(), Some(Vec2::new(-3.0, 0.1)));
}

#[test]
fn test_bus_delivers_target_moves_to_outside_listeners() {
    let mut world = open_world(Vec2::new(-3.0, 0.0));
    let bus: &EventBus = world.bus();
    let listener = bus.subscribe::<TargetMoved>();
    assert_eq!(world.subscriber_count(), 1);

    world.move_target(Vec2::new(-3.0, 0.0));
    assert!(listener.latest().is_none());

    world.move_target(Vec2::new(-2.0, 0.0));
    world.move_target(Vec2::new(-1.0, 0.0));
    assert_eq!(listener.pending_count(), 2);
    assert_eq!(listener.latest(), Some(TargetMoved { position: Vec2::new(-1.0, 0.0) }));
}

#[test]
fn test_despawn_releases_subscription() {
    let mut world = open_world(Vec2::new(50.0, 50.0));
    let a = world.spawn_agent(chaser_config(), Vec2::ZERO, 1).unwrap();
    let b = world.spawn_agent(AgentConfig::guard(Vec2::ONE), Vec2::ONE, 2).unwrap();
    assert_eq!(world.subscriber_count(), 2);
    assert_eq!(world.scene().len(), 3);

    world.despawn_agent(a).unwrap();
    assert_eq!(world.subscriber_count(), 1);
    assert_eq!(world.scene().len(), 2);
    assert!(world.agent(a).is_none());
    assert!(world.agent(b).is_some());

    assert!(matches!(world.despawn_agent(a), Err(SimError::UnknownAgent(_))));
}

#[test]
fn test_invalid_agent_rejected() {
    let mut world = open_world(Vec2::ZERO);
    let config = AgentConfig::guard(Vec2::ZERO).with_vision(-1.0, 3.0);
    assert!(matches!(
        world.spawn_agent(config, Vec2::ZERO, 0),
        Err(SimError::Agent(AgentError::InvalidConfig(_)))
    ));
    assert_eq!(world.agent_count(), 0);
    assert_eq!(world.subscriber_count(), 0);
}

#[test]
fn test_guard_attacks_reach_drain() {
    let mut world = open_world(Vec2::new(2.0, 0.0));
    let config = AgentConfig::guard(Vec2::ZERO)
        .with_initial_facing(Facing::Right)
        .with_attack(3.0, 1.0);
    let id = world.spawn_agent(config, Vec2::ZERO, 0).unwrap();

    world.step(DT);
    assert_eq!(world.agent(id).unwrap().state(), BehaviorState::Attack);

    let attacks = world.drain_effects();
    assert_eq!(attacks.len(), 1);
    assert_eq!(attacks[0].agent, id);
    assert_eq!(attacks[0].position, Vec2::new(2.0, 0.0));
    assert!(world.drain_effects().is_empty());
}

fn populated_world() -> (World, TargetRoute) {
    let mut scene = Scene::new(Vec2::new(-8.0, 0.0), 0.3);
    scene.add_wall(sentry_math::Aabb2::new(Vec2::new(-1.0, 1.0), Vec2::new(0.0, 2.0)));
    let mut world = World::new(scene, Vec2::new(-8.0, 0.0));

    for i in 0..6 {
        let y = i as f32 * 2.0 - 5.0;
        world
            .spawn_agent(
                AgentConfig::patrol(Vec2::new(-5.0, y), Vec2::new(5.0, y)),
                Vec2::new(-5.0, y),
                i,
            )
            .unwrap();
    }
    world
        .spawn_agent(
            AgentConfig::guard(Vec2::new(4.0, 0.0)).with_attack(2.0, 1.0),
            Vec2::new(4.0, 0.0),
            99,
        )
        .unwrap();

    let route = TargetRoute::new(vec![Vec2::new(8.0, 0.0), Vec2::new(-8.0, 0.0)], 1.5).looped();
    (world, route)
}

#[test]
fn test_parallel_step_matches_sequential() {
    let (mut sequential, mut route_a) = populated_world();
    let (mut parallel, mut route_b) = populated_world();
    let mut attacks = (0, 0);

    for _ in 0..300 {
        let next = route_a.advance(sequential.target(), DT);
        sequential.move_target(next);
        sequential.step(DT);
        attacks.0 += sequential.drain_effects().len();

        let next = route_b.advance(parallel.target(), DT);
        parallel.move_target(next);
        parallel.step_parallel(DT, 3).unwrap();
        attacks.1 += parallel.drain_effects().len();

        assert_eq!(sequential.snapshots(), parallel.snapshots());
    }
    assert_eq!(attacks.0, attacks.1);
    assert_eq!(parallel.ticks(), 300);
}

#[test]
fn test_step_parallel_with_no_agents() {
    let mut world = open_world(Vec2::ZERO);
    world.step_parallel(DT, 4).unwrap();
    assert_eq!(world.ticks(), 1);
}

#[test]
fn test_sample_scenario_runs() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenarios/courtyard.toml");
    let scenario = Scenario::load(path).unwrap();
    assert_eq!(scenario.agents.len(), 3);

    let mut sim = Simulation::from_scenario(&scenario).unwrap();
    for _ in 0..300 {
        sim.step().unwrap();
    }
    assert_eq!(sim.world().ticks(), 300);
    assert_eq!(sim.world().agent_count(), 3);
}
