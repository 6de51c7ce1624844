use monster_maze_core::{Command, Event, InputKey};
use monster_maze_system_view::ViewSelector;
use monster_maze_world::{self as world, query, World};

const WALK_SEED: u64 = 0x5eed_0f_d00d;
const WALK_LENGTH: usize = 4_000;

fn next_random(state: u64) -> u64 {
    state
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407)
}

fn scripted_keys() -> Vec<InputKey> {
    let mut state = WALK_SEED;
    (0..WALK_LENGTH)
        .map(|_| {
            state = next_random(state);
            InputKey::ALL[((state >> 33) % InputKey::ALL.len() as u64) as usize]
        })
        .collect()
}

#[test]
fn random_walk_never_enters_a_wall() {
    let mut world = World::new();
    let mut events = Vec::new();

    for key in scripted_keys() {
        world::apply(&mut world, key.command(), &mut events);
        let player = query::player(&world);
        assert!(
            query::maze_view(&world).is_open(player.cell()),
            "player entered {:?} after pressing {}",
            player.cell(),
            key.name()
        );
    }

    assert_eq!(events.len(), WALK_LENGTH);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::PlayerMoved { .. })));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::MoveRejected { .. })));
}

#[test]
fn accepted_forward_moves_are_undone_by_backward_moves() {
    let mut world = World::new();
    let mut scratch = Vec::new();

    for key in scripted_keys() {
        let before = query::player(&world);
        let mut events = Vec::new();
        world::apply(&mut world, Command::MoveForward, &mut events);
        if matches!(events.as_slice(), [Event::PlayerMoved { .. }]) {
            world::apply(&mut world, Command::MoveBackward, &mut events);
            assert_eq!(query::player(&world), before);
        } else {
            assert_eq!(query::player(&world), before);
        }
        world::apply(&mut world, key.command(), &mut scratch);
    }
}

#[test]
fn replaying_the_same_keys_selects_the_same_frames() {
    let replay = || {
        let mut world = World::new();
        let mut events = Vec::new();
        let mut frames = Vec::new();
        for key in scripted_keys().into_iter().take(500) {
            world::apply(&mut world, key.command(), &mut events);
            frames.push(
                ViewSelector.frame_layers(query::maze_view(&world), query::player(&world)),
            );
        }
        (frames, events)
    };

    assert_eq!(replay(), replay());
}
