//! The game service: every room, every session, one event at a time.
//!
//! [`GameService`] owns the room registry, the session index, the word
//! source and the timer scheduler. It is driven by [`Command`]s, either a
//! client event, a closed connection, or a fired [`Alarm`], and each
//! command runs to completion before the next one starts. Nothing here
//! is async; the server's game loop is the only caller.
//!
//! Outbound notifications are collected in an [`Outbox`] and returned in
//! the order they were produced.

use scribble_protocol::{ClientEvent, ConnectionId, Recipient, RoomId, ServerEvent, Stroke};
use scribble_session::{SessionError, SessionIndex};
use scribble_timer::Scheduler;

use crate::{
    Alarm, AlarmKind, EndReason, GameConfig, Player, Room, RoomError, RoomRegistry, RoundPhase,
    Verdict, WordBank, WordSource, consonant_hint, evaluate, next_drawer,
};

/// Placeholder for players who join without a nickname.
pub const DEFAULT_NICKNAME: &str = "익명";

/// One unit of work for the service.
#[derive(Debug, Clone)]
pub enum Command {
    /// A decoded event from a connected client.
    Client { conn: ConnectionId, event: ClientEvent },
    /// The connection closed.
    Disconnected(ConnectionId),
    /// A timer fired.
    Alarm(Alarm),
}

/// Ordered outbound events produced by one command.
#[derive(Debug, Default)]
pub struct Outbox {
    items: Vec<(Recipient, ServerEvent)>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event for every member of `room_id`.
    pub fn room(&mut self, room_id: &RoomId, event: ServerEvent) {
        self.items.push((Recipient::Room(room_id.clone()), event));
    }

    /// Queues an event for every member of `room_id` but `skip`.
    pub fn room_except(&mut self, room_id: &RoomId, skip: ConnectionId, event: ServerEvent) {
        self.items
            .push((Recipient::RoomExcept(room_id.clone(), skip), event));
    }

    /// Queues an event for a single connection.
    pub fn to(&mut self, conn: ConnectionId, event: ServerEvent) {
        self.items.push((Recipient::Connection(conn), event));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<(Recipient, ServerEvent)> {
        self.items
    }
}

/// Authoritative state for all rooms.
///
/// Generic over the timer capability so tests can drive time with a
/// fake clock, and over the word source so tests can pin the word.
pub struct GameService<S, W = WordBank>
where
    S: Scheduler<Alarm>,
    W: WordSource,
{
    config: GameConfig,
    rooms: RoomRegistry,
    sessions: SessionIndex,
    scheduler: S,
    words: W,
}

impl<S, W> GameService<S, W>
where
    S: Scheduler<Alarm>,
    W: WordSource,
{
    /// Creates a service with no rooms.
    ///
    /// # Errors
    /// [`RoomError::InvalidConfig`] if the config fails validation or the
    /// word source lacks the default category.
    pub fn new(config: GameConfig, scheduler: S, words: W) -> Result<Self, RoomError> {
        config.validate()?;
        if !words.has_category(&config.default_category) {
            return Err(RoomError::InvalidConfig(format!(
                "word source has no default category {}",
                config.default_category
            )));
        }
        Ok(Self {
            config,
            rooms: RoomRegistry::new(),
            sessions: SessionIndex::new(),
            scheduler,
            words,
        })
    }

    // -----------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------

    /// Applies one command and returns what should be sent, in order.
    ///
    /// Precondition failures (unknown room, not in a room, round already
    /// running, ...) are logged and produce no output.
    pub fn handle(&mut self, command: Command) -> Vec<(Recipient, ServerEvent)> {
        let mut out = Outbox::new();
        let result = match command {
            Command::Client { conn, event } => self.dispatch(conn, event, &mut out),
            Command::Disconnected(conn) => self.disconnect(conn, &mut out),
            Command::Alarm(alarm) => self.fire(alarm, &mut out),
        };
        match result {
            Ok(()) => out.into_vec(),
            Err(e) => {
                tracing::debug!(error = %e, "command ignored");
                Vec::new()
            }
        }
    }

    fn dispatch(
        &mut self,
        conn: ConnectionId,
        event: ClientEvent,
        out: &mut Outbox,
    ) -> Result<(), RoomError> {
        match event {
            ClientEvent::JoinRoom { room_id, nickname } => {
                self.join(conn, &room_id, &nickname, out)
            }
            ClientEvent::LeaveRoom {} => self.leave(conn, out),
            ClientEvent::SetCategory { category } => self.set_category(conn, &category, out),
            ClientEvent::StartGame {} => {
                let room_id = self.bound_room(conn)?;
                self.start_game(&room_id, out)
            }
            ClientEvent::Draw(stroke) => self.relay_draw(conn, stroke, out),
            ClientEvent::ClearCanvas { .. } => self.relay_clear(conn, out),
            ClientEvent::Answer { message } => self.submit_answer(conn, &message, out),
            ClientEvent::ChatMessage { message } => self.chat(conn, &message, out),
        }
    }

    // -----------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------

    /// Puts `conn` into a room, leaving its previous room first.
    ///
    /// Both inputs are trimmed. A blank nickname becomes
    /// [`DEFAULT_NICKNAME`]; a blank room id becomes a fresh random id.
    pub fn join(
        &mut self,
        conn: ConnectionId,
        room_id: &str,
        nickname: &str,
        out: &mut Outbox,
    ) -> Result<(), RoomError> {
        let nickname = match nickname.trim() {
            "" => DEFAULT_NICKNAME,
            trimmed => trimmed,
        };
        let room_id = match room_id.trim() {
            "" => self.rooms.random_room_id(),
            trimmed => RoomId::new(trimmed),
        };

        match self.sessions.room_of(conn).cloned() {
            Some(current) if current == room_id => {
                return Err(RoomError::AlreadyInRoom(conn, room_id));
            }
            Some(_) => self.depart(conn, out)?,
            None => {}
        }

        self.sessions.bind(conn, room_id.clone())?;
        let room = self.rooms.get_or_create(&room_id, &self.config);
        room.roster.add(Player::new(conn, nickname));
        tracing::info!(room_id = %room_id, %conn, nickname, players = room.roster.len(), "player joined");

        out.room(
            &room_id,
            ServerEvent::SystemMessage {
                message: format!("{nickname}님이 입장했습니다."),
            },
        );
        out.room(&room_id, ServerEvent::RoomState(room.snapshot()));
        Ok(())
    }

    /// Takes `conn` out of its room, keeping the connection open.
    pub fn leave(&mut self, conn: ConnectionId, out: &mut Outbox) -> Result<(), RoomError> {
        self.depart(conn, out)
    }

    /// Handles a closed connection.
    pub fn disconnect(&mut self, conn: ConnectionId, out: &mut Outbox) -> Result<(), RoomError> {
        tracing::debug!(%conn, "connection closed");
        self.depart(conn, out)
    }

    /// Shared departure path for leave, disconnect and room switches.
    fn depart(&mut self, conn: ConnectionId, out: &mut Outbox) -> Result<(), RoomError> {
        let room_id = self.bound_room(conn)?;
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;
        let player = room
            .roster
            .remove(conn)
            .ok_or_else(|| RoomError::NotInRoom(conn, room_id.clone()))?;
        self.sessions.unbind(conn)?;

        let was_drawer = room.drawer == Some(conn);
        if was_drawer {
            room.drawer = None;
        }
        let interrupted = was_drawer && room.phase.is_active();
        let emptied = room.roster.is_empty();
        tracing::info!(room_id = %room_id, %conn, nickname = %player.nickname, "player left");

        out.room(
            &room_id,
            ServerEvent::SystemMessage {
                message: format!("{}님이 퇴장했습니다.", player.nickname),
            },
        );

        if emptied {
            self.destroy_room(&room_id);
        } else if interrupted {
            self.end_round(&room_id, EndReason::DrawerLeft, out)?;
        } else {
            out.room(&room_id, ServerEvent::RoomState(room.snapshot()));
        }
        Ok(())
    }

    /// Removes a room and cancels whatever it still had scheduled.
    fn destroy_room(&mut self, room_id: &RoomId) {
        if let Some(mut room) = self.rooms.remove(room_id) {
            for handle in room.timers.take_all() {
                self.scheduler.cancel(handle);
            }
            tracing::info!(room_id = %room_id, "room destroyed");
        }
    }

    // -----------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------

    /// Changes the word category of the caller's room. Applies from the
    /// next round on.
    pub fn set_category(
        &mut self,
        conn: ConnectionId,
        category: &str,
        out: &mut Outbox,
    ) -> Result<(), RoomError> {
        let room_id = self.bound_room(conn)?;
        let category = category.trim();
        if !self.words.has_category(category) {
            return Err(RoomError::UnknownCategory(category.to_string()));
        }
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;
        room.category = category.to_string();
        tracing::debug!(room_id = %room_id, category, "category changed");

        out.room(
            &room_id,
            ServerEvent::SystemMessage {
                message: format!("카테고리가 {category}(으)로 변경되었습니다."),
            },
        );
        out.room(&room_id, ServerEvent::RoomState(room.snapshot()));
        Ok(())
    }

    // -----------------------------------------------------------------
    // Round state machine
    // -----------------------------------------------------------------

    /// Starts a new game from round 1. Refused while a round is active.
    pub fn start_game(&mut self, room_id: &RoomId, out: &mut Outbox) -> Result<(), RoomError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;
        if room.phase.is_active() {
            return Err(RoomError::RoundInProgress(room_id.clone()));
        }
        room.round = 0;
        room.word = None;
        room.drawer = None;
        room.phase = RoundPhase::Idle;
        tracing::info!(room_id = %room_id, "game started");
        self.start_round(room_id, out)
    }

    /// Advances to the next round, or to game over past `max_rounds`.
    ///
    /// Every timer the room still holds is cancelled first, so after this
    /// returns the room has at most one hint and one timeout pending.
    pub fn start_round(&mut self, room_id: &RoomId, out: &mut Outbox) -> Result<(), RoomError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;
        if room.roster.is_empty() {
            return Ok(());
        }

        let round = room.round + 1;
        if round > room.max_rounds {
            for handle in room.timers.take_all() {
                self.scheduler.cancel(handle);
            }
            room.next_epoch();
            room.round = round;
            room.phase = RoundPhase::GameOver;
            room.word = None;
            room.drawer = None;
            tracing::info!(room_id = %room_id, rounds = room.max_rounds, "game over");

            out.room(
                room_id,
                ServerEvent::GameEnded {
                    players: room.roster.infos(),
                },
            );
            out.room(room_id, ServerEvent::ClearCanvas);
            out.room(room_id, ServerEvent::HintUpdated { hint: String::new() });
            out.room(room_id, ServerEvent::RoomState(room.snapshot()));
            return Ok(());
        }

        let drawer = next_drawer(&room.roster.ids(), room.drawer)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;
        let word = self.words.pick(&room.category).ok_or_else(|| {
            RoomError::InvalidConfig(format!("no words for category {}", room.category))
        })?;

        for handle in room.timers.take_all() {
            self.scheduler.cancel(handle);
        }
        let epoch = room.next_epoch();
        room.round = round;
        room.drawer = Some(drawer);
        room.word = Some(word.clone());
        room.phase = RoundPhase::Active;

        room.timers.hint = Some(self.scheduler.schedule(
            self.config.hint_delay(),
            Alarm::new(room_id.clone(), epoch, AlarmKind::RevealHint),
        ));
        room.timers.timeout = Some(self.scheduler.schedule(
            self.config.round_duration,
            Alarm::new(room_id.clone(), epoch, AlarmKind::RoundTimeout),
        ));
        tracing::info!(room_id = %room_id, round, %drawer, epoch, "round started");

        out.room(room_id, ServerEvent::ClearCanvas);
        out.room(room_id, ServerEvent::HintUpdated { hint: String::new() });
        out.room(
            room_id,
            ServerEvent::RoundStarted {
                round,
                max_rounds: room.max_rounds,
                drawer_id: drawer,
                round_duration_sec: self.config.round_duration.as_secs(),
            },
        );
        out.to(drawer, ServerEvent::WordForDrawer { word });
        out.room(room_id, ServerEvent::RoomState(room.snapshot()));
        Ok(())
    }

    /// Ends the active round and schedules the next one after the
    /// cooldown. Does nothing if no round is active.
    fn end_round(
        &mut self,
        room_id: &RoomId,
        reason: EndReason,
        out: &mut Outbox,
    ) -> Result<(), RoomError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;
        if !room.phase.is_active() {
            return Ok(());
        }

        for handle in room.timers.take_round() {
            self.scheduler.cancel(handle);
        }
        let epoch = room.next_epoch();
        room.phase = RoundPhase::Idle;
        room.word = None;
        room.timers.next_round = Some(self.scheduler.schedule(
            self.config.cooldown,
            Alarm::new(room_id.clone(), epoch, AlarmKind::NextRound),
        ));
        tracing::info!(room_id = %room_id, round = room.round, ?reason, "round ended");

        out.room(
            room_id,
            ServerEvent::RoundEnded {
                reason: reason.message(),
                round: room.round,
            },
        );
        out.room(room_id, ServerEvent::ClearCanvas);
        out.room(room_id, ServerEvent::HintUpdated { hint: String::new() });
        out.room(room_id, ServerEvent::RoomState(room.snapshot()));
        Ok(())
    }

    /// Handles a fired timer. Alarms for a room that is gone, or stamped
    /// with an older epoch, are dropped.
    pub fn fire(&mut self, alarm: Alarm, out: &mut Outbox) -> Result<(), RoomError> {
        let Some(room) = self.rooms.get_mut(&alarm.room_id) else {
            tracing::debug!(room_id = %alarm.room_id, kind = ?alarm.kind, "alarm for missing room dropped");
            return Ok(());
        };
        if room.epoch != alarm.epoch {
            tracing::debug!(
                room_id = %alarm.room_id,
                kind = ?alarm.kind,
                alarm_epoch = alarm.epoch,
                epoch = room.epoch,
                "stale alarm dropped"
            );
            return Ok(());
        }

        match alarm.kind {
            AlarmKind::RevealHint => {
                room.timers.hint = None;
                if !room.phase.is_active() {
                    return Ok(());
                }
                if let Some(word) = room.word.as_deref() {
                    out.room(
                        &alarm.room_id,
                        ServerEvent::HintUpdated {
                            hint: consonant_hint(word),
                        },
                    );
                }
                Ok(())
            }
            AlarmKind::RoundTimeout => {
                room.timers.timeout = None;
                self.end_round(&alarm.room_id, EndReason::TimedOut, out)
            }
            AlarmKind::NextRound => {
                room.timers.next_round = None;
                // A failed start leaves the room idle until someone starts
                // a new game.
                let started = self.start_round(&alarm.room_id, out);
                if let Err(e) = &started {
                    tracing::warn!(room_id = %alarm.room_id, error = %e, "next round could not start");
                }
                started
            }
        }
    }

    // -----------------------------------------------------------------
    // Guesses, chat, drawing
    // -----------------------------------------------------------------

    /// Evaluates a guess; correct guesses score and end the round.
    pub fn submit_answer(
        &mut self,
        conn: ConnectionId,
        text: &str,
        out: &mut Outbox,
    ) -> Result<(), RoomError> {
        let room_id = self.bound_room(conn)?;
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;
        let guess = text.trim();
        if guess.is_empty() {
            return Err(RoomError::EmptyMessage);
        }
        let verdict = evaluate(room, conn, guess);
        let player = room
            .roster
            .get_mut(conn)
            .ok_or_else(|| RoomError::NotInRoom(conn, room_id.clone()))?;

        match verdict {
            Verdict::Unscored | Verdict::DrawerSelf => {
                out.room(&room_id, chat(&player.nickname, guess, false));
                Ok(())
            }
            Verdict::Incorrect => {
                out.room(&room_id, chat(&player.nickname, guess, false));
                out.room(&room_id, ServerEvent::RoomState(room.snapshot()));
                Ok(())
            }
            Verdict::Correct => {
                player.score = player.score.saturating_add(self.config.score_reward);
                let nickname = player.nickname.clone();
                let new_score = player.score;
                let word = room.word.clone().unwrap_or_default();
                tracing::info!(room_id = %room_id, %conn, nickname = %nickname, new_score, "correct guess");

                out.room(&room_id, chat(&nickname, guess, true));
                out.room(
                    &room_id,
                    ServerEvent::AnswerResult {
                        correct: true,
                        player_id: conn,
                        nickname: nickname.clone(),
                        word,
                        new_score,
                    },
                );
                self.end_round(&room_id, EndReason::Guessed { nickname }, out)
            }
        }
    }

    /// Plain chat; never evaluated.
    pub fn chat(
        &mut self,
        conn: ConnectionId,
        text: &str,
        out: &mut Outbox,
    ) -> Result<(), RoomError> {
        let room_id = self.bound_room(conn)?;
        let message = text.trim();
        if message.is_empty() {
            return Err(RoomError::EmptyMessage);
        }
        let player = self
            .rooms
            .get(&room_id)
            .and_then(|room| room.roster.get(conn))
            .ok_or_else(|| RoomError::NotInRoom(conn, room_id.clone()))?;
        out.room(&room_id, chat(&player.nickname, message, false));
        Ok(())
    }

    /// Forwards a stroke to everyone else in the sender's room.
    pub fn relay_draw(
        &mut self,
        conn: ConnectionId,
        mut stroke: Stroke,
        out: &mut Outbox,
    ) -> Result<(), RoomError> {
        let room_id = self.bound_room(conn)?;
        stroke.room_id = room_id.as_str().to_string();
        out.room_except(&room_id, conn, ServerEvent::Draw(stroke));
        Ok(())
    }

    /// Forwards a canvas wipe to everyone else in the sender's room.
    pub fn relay_clear(&mut self, conn: ConnectionId, out: &mut Outbox) -> Result<(), RoomError> {
        let room_id = self.bound_room(conn)?;
        out.room_except(&room_id, conn, ServerEvent::ClearCanvas);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    fn bound_room(&self, conn: ConnectionId) -> Result<RoomId, RoomError> {
        self.sessions
            .room_of(conn)
            .cloned()
            .ok_or(RoomError::Session(SessionError::NotBound(conn)))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_of(&self, conn: ConnectionId) -> Option<&RoomId> {
        self.sessions.room_of(conn)
    }

    pub fn sessions(&self) -> &SessionIndex {
        &self.sessions
    }

    /// Current members of a room, in join order.
    pub fn members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|room| room.roster.ids())
            .unwrap_or_default()
    }

    /// Resolves a recipient to the connections that should get the event.
    pub fn recipients(&self, recipient: &Recipient) -> Vec<ConnectionId> {
        match recipient {
            Recipient::Room(room_id) => self.members(room_id),
            Recipient::RoomExcept(room_id, skip) => self
                .members(room_id)
                .into_iter()
                .filter(|id| id != skip)
                .collect(),
            Recipient::Connection(conn) => vec![*conn],
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

fn chat(nickname: &str, message: &str, correct: bool) -> ServerEvent {
    ServerEvent::Chat {
        nickname: nickname.to_string(),
        message: message.to_string(),
        correct,
    }
}
