//! Per-state handlers, dispatched through a table indexed by state

use super::{Agent, Post, TickContext};
use crate::schedule::TaskKind;
use crate::state::BehaviorState;

type StateHandler = fn(&mut Agent, &TickContext<'_>);

/// Ordered like [`BehaviorState::ALL`]
const STATE_HANDLERS: [StateHandler; 7] = [patrol, guard, warning, explore, chase, lost, attack];

/// Run the current state's handler
pub(super) fn dispatch(agent: &mut Agent, ctx: &TickContext<'_>) {
    STATE_HANDLERS[agent.state.index()](agent, ctx);
}

fn patrol(agent: &mut Agent, _ctx: &TickContext<'_>) {
    let position = agent.position;
    let tolerance = agent.config.arrival_tolerance;
    let Post::Patrol(route) = &mut agent.post else {
        let home = agent.home_state();
        agent.transition(home);
        return;
    };

    if position.distance(route.current()) <= tolerance {
        route.flip();
    }
    let destination = route.current();

    agent.navigator.set_speed(agent.config.base_speed);
    agent.navigator.set_destination(destination);
}

fn guard(agent: &mut Agent, _ctx: &TickContext<'_>) {
    agent.hold_post();
}

fn warning(agent: &mut Agent, _ctx: &TickContext<'_>) {
    agent.navigator.stop();
}

fn explore(agent: &mut Agent, _ctx: &TickContext<'_>) {
    let Some(heard) = agent.heard_target else {
        let home = agent.home_state();
        agent.transition(home);
        return;
    };

    if agent.arrived_at(heard) {
        agent.heard_target = None;
        let home = agent.home_state();
        agent.transition(home);
        return;
    }

    agent.navigator.set_speed(agent.config.base_speed);
    agent.navigator.set_destination(heard);
}

fn chase(agent: &mut Agent, ctx: &TickContext<'_>) {
    let Some(last_known) = agent.last_known_target else {
        agent.transition(BehaviorState::Lost);
        return;
    };

    if agent.arrived_at(last_known) {
        if !agent.check_attack_range(ctx.target_position, ctx.scene) {
            agent.transition(BehaviorState::Lost);
        }
        return;
    }

    let speed = agent.config.base_speed * agent.config.chase_speed_multiplier;
    agent.navigator.set_speed(speed);
    agent.navigator.set_destination(last_known);
}

fn lost(agent: &mut Agent, _ctx: &TickContext<'_>) {
    agent.navigator.set_speed(agent.config.base_speed);
    if agent.scheduler.active() != Some(TaskKind::Search) {
        log::debug!("{} lost the target, searching", agent.id);
        agent
            .scheduler
            .start_search(agent.config.search_duration, agent.config.search_interval);
    }
}

fn attack(agent: &mut Agent, ctx: &TickContext<'_>) {
    if !agent.is_guard() {
        let home = agent.home_state();
        agent.transition(home);
        return;
    }
    agent.begin_attack(ctx);
}
