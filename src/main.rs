//! Shadow Dungeon headless runner
//!
//! Loads a layout, plays a scripted run for a fixed number of frames and
//! prints the final player stats as JSON.
//!
//! Usage: `shadow-dungeon [properties-file] [seed] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Shadow Dungeon (headless) starting...");

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;

    use shadow_dungeon::GameProps;
    use shadow_dungeon::render::{draw_list, stats};
    use shadow_dungeon::sim::{GameState, Room, TickInput, tick};

    const DEFAULT_PROPERTIES: &str = "res/app.properties";
    const DEFAULT_SEED: u64 = 42;
    const DEFAULT_FRAMES: u64 = 3600;

    pub fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let path = args.first().map(String::as_str).unwrap_or(DEFAULT_PROPERTIES);
        let seed = match args.get(1) {
            Some(s) => s.parse()?,
            None => DEFAULT_SEED,
        };
        let frames = match args.get(2) {
            Some(s) => s.parse()?,
            None => DEFAULT_FRAMES,
        };

        let props = GameProps::load(path)?;
        let mut state = GameState::new(&props, seed)?;
        log::info!("Game initialized with seed: {}", seed);

        for _ in 0..frames {
            let input = scripted_input(&state);
            tick(&mut state, &input);
            for event in state.drain_events() {
                log::info!("frame {}: {:?}", state.frame, event);
            }
        }

        log::info!(
            "Stopped in {} after {} frames, {} sprites on screen",
            state.current.config_name(),
            state.frame,
            draw_list(&state).len()
        );
        println!("{}", serde_json::to_string_pretty(&stats(&state))?);
        Ok(())
    }

    /// A simple bot: pick the Robot, head for the exit, and shoot whatever is awake
    fn scripted_input(state: &GameState) -> TickInput {
        let player = &state.player;
        let mut input = TickInput {
            cursor: player.pos,
            ..Default::default()
        };

        match state.current_room() {
            Room::Prep(room) => {
                input.select_robot = true;
                steer(&mut input, player.pos.x, room.door.pos.x);
            }
            Room::Battle(room) => {
                if let Some(enemy) = room.enemies.iter().find(|e| e.is_combatant()) {
                    input.cursor = enemy.pos;
                    input.shoot = true;
                } else {
                    input.interact = true;
                    steer(&mut input, player.pos.x, room.doors[1].pos.x);
                }
            }
            Room::End(_) => {}
        }
        input
    }

    fn steer(input: &mut TickInput, from: f32, to: f32) {
        input.right = to > from;
        input.left = to < from;
    }
}
