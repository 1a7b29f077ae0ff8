//! Enemy behaviour state machine.
//!
//! `evaluate` is a pure function over plain data; `run` applies it to every
//! enemy before movement. Descending -> Hovering is the only transition.

use hecs::World;

use hoverstrike_core::components::Enemy;
use hoverstrike_core::enums::EnemyState;
use hoverstrike_core::types::{Motion, Position};

/// Input to the FSM for a single enemy.
pub struct EnemyContext {
    pub state: EnemyState,
    pub center_y: f32,
    pub hover_threshold: f32,
}

/// Output from the FSM.
pub struct EnemyUpdate {
    pub new_state: EnemyState,
    pub state_changed: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    match ctx.state {
        EnemyState::Descending if ctx.center_y > ctx.hover_threshold => EnemyUpdate {
            new_state: EnemyState::Hovering,
            state_changed: true,
        },
        state => EnemyUpdate {
            new_state: state,
            state_changed: false,
        },
    }
}

/// Run the FSM for all enemies. Hovering enemies stop moving.
pub fn run(world: &mut World) {
    for (_entity, (enemy, pos, motion)) in
        world.query_mut::<(&mut Enemy, &Position, &mut Motion)>()
    {
        let update = evaluate(&EnemyContext {
            state: enemy.state,
            center_y: pos.center.y,
            hover_threshold: enemy.hover_threshold,
        });

        if update.state_changed {
            enemy.state = update.new_state;
            *motion = Motion::stationary();
        }
    }
}
