//! Preparation room: character selection and the way into the first arena

use serde::{Deserialize, Serialize};

use super::{Frame, FrameGate, RoomId, RoomSignal};
use crate::config::{ConfigError, GameProps, Result};
use crate::sim::door::{Door, DoorEvent};
use crate::sim::interactable::RestartArea;
use crate::sim::player::CharacterKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepRoom {
    pub door: Door,
    pub restart_area: Option<RestartArea>,
    pub gate: FrameGate,
}

impl PrepRoom {
    pub fn from_props(props: &GameProps) -> Result<Self> {
        let spec = props
            .door("door", RoomId::Prep)?
            .ok_or(ConfigError::MissingLayout {
                room: "prep",
                what: "door",
            })?;
        let restart_area = props
            .points("restartarea", RoomId::Prep)?
            .first()
            .copied()
            .map(RestartArea::new);
        Ok(Self {
            door: Door::new(spec.pos, spec.to, None),
            restart_area,
            gate: FrameGate::default(),
        })
    }

    pub fn update(&mut self, frame: &mut Frame) -> RoomSignal {
        self.gate.begin_frame();
        if !self.gate.has_player() {
            return RoomSignal::Continue;
        }
        let player = &mut *frame.player;
        let input = frame.input;

        let mut signal = RoomSignal::Continue;
        if let DoorEvent::Enter(to) = self.door.update(player, true) {
            self.gate.request_suspend();
            signal = RoomSignal::ChangeRoom(to);
        }
        if self.gate.should_stop() {
            return signal;
        }

        if let Some(area) = &self.restart_area {
            if area.triggered(player, input.restart) {
                self.gate.detach_player();
                return RoomSignal::Restart;
            }
        }

        player.update(input, frame.tuning);

        let picked = if input.select_robot {
            Some(CharacterKind::Robot)
        } else if input.select_marine {
            Some(CharacterKind::Marine)
        } else {
            None
        };
        if let Some(character) = picked {
            player.select_character(character);
            if !self.door.is_unlocked() {
                self.door.unlock(false);
                log::info!("Picked {:?}; prep door unlocked", character);
            }
        }

        RoomSignal::Continue
    }
}
