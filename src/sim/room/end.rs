//! Ending room, reached by clearing both arenas or by dying

use serde::{Deserialize, Serialize};

use super::{Frame, FrameGate, RoomId, RoomSignal};
use crate::config::{ConfigError, GameProps, Result};
use crate::sim::door::{Door, DoorEvent};
use crate::sim::interactable::RestartArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndOutcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndRoom {
    pub door: Door,
    pub restart_area: Option<RestartArea>,
    /// `None` until the player first arrives
    pub outcome: Option<EndOutcome>,
    pub gate: FrameGate,
}

impl EndRoom {
    pub fn from_props(props: &GameProps) -> Result<Self> {
        let spec = props
            .door("door", RoomId::End)?
            .ok_or(ConfigError::MissingLayout {
                room: "end",
                what: "door",
            })?;
        let restart_area = props
            .points("restartarea", RoomId::End)?
            .first()
            .copied()
            .map(RestartArea::new);
        Ok(Self {
            door: Door::new(spec.pos, spec.to, None),
            restart_area,
            outcome: None,
            gate: FrameGate::default(),
        })
    }

    /// Arrived through the door from the last arena. A loss is final.
    pub fn mark_won(&mut self) {
        if self.outcome != Some(EndOutcome::Lost) {
            self.outcome = Some(EndOutcome::Won);
        }
    }

    /// Player died; the way back is shut for good
    pub fn mark_lost(&mut self) {
        self.outcome = Some(EndOutcome::Lost);
        self.door.lock();
    }

    pub fn update(&mut self, frame: &mut Frame) -> RoomSignal {
        self.gate.begin_frame();
        if !self.gate.has_player() {
            return RoomSignal::Continue;
        }
        let player = &mut *frame.player;

        let mut signal = RoomSignal::Continue;
        if let DoorEvent::Enter(to) = self.door.update(player, true) {
            self.gate.request_suspend();
            signal = RoomSignal::ChangeRoom(to);
        }
        if self.gate.should_stop() {
            return signal;
        }

        if let Some(area) = &self.restart_area {
            if area.triggered(player, frame.input.restart) {
                self.gate.detach_player();
                return RoomSignal::Restart;
            }
        }

        player.update(frame.input, frame.tuning);
        RoomSignal::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::door::DoorState;

    fn room() -> EndRoom {
        let props = GameProps::parse("door.end=60,380,B\nrestartarea.end=0\n");
        EndRoom::from_props(&props).unwrap()
    }

    #[test]
    fn test_restart_area_optional() {
        assert!(room().restart_area.is_none());
    }

    #[test]
    fn test_loss_is_sticky_and_locks_door() {
        let mut end = room();
        end.door.unlock(true);
        end.mark_lost();
        end.mark_won();
        assert_eq!(end.outcome, Some(EndOutcome::Lost));
        assert_eq!(end.door.state(), DoorState::Locked);
    }
}
