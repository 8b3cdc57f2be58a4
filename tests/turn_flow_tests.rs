use pixel_pioneers::controller::{START_FAILED_MESSAGE, TURN_FAILED_MESSAGE};
use pixel_pioneers::worker::{TurnRequest, TurnWorker};
use pixel_pioneers::{GameError, TurnController, TurnPhase};
mod common;
use common::{ScriptedSession, payload};

#[ctor::ctor]
fn _init() { common::init(); }

/// Spin until the worker answers, then feed the reply to the controller.
fn pump(worker: &TurnWorker, controller: &mut TurnController) {
    for _ in 0..500 {
        if let Some(reply) = worker.try_reply() {
            assert!(controller.complete(reply));
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
    panic!("worker did not reply in time");
}

fn begin(worker: &TurnWorker, controller: &mut TurnController) {
    controller.begin_session();
    worker.request(TurnRequest::Begin).unwrap();
    pump(worker, controller);
}

fn submit(worker: &TurnWorker, controller: &mut TurnController, action: &str) {
    let action = controller.submit(action).expect("action accepted");
    worker.request(TurnRequest::Action(action)).unwrap();
}

#[test]
fn start_then_successful_turn_replaces_both_states() {
    let session = ScriptedSession::new([
        Ok(payload("You wake up.", "Cave", 100, &[], &["Look around", "Open door"])),
        Ok(payload("The door creaks open.", "Corridor", 95, &["rusty key"], &["Go left", "Go right"])),
    ]);
    let log = session.sent_log();
    let worker = TurnWorker::spawn(session);
    let mut controller = TurnController::new();

    begin(&worker, &mut controller);
    assert_eq!(controller.phase(), &TurnPhase::Idle);
    assert_eq!(controller.game().unwrap().location, "Cave");

    submit(&worker, &mut controller, "Open door");
    assert!(controller.is_busy());
    assert_eq!(controller.game().unwrap().narrative, "You wake up.\n\n> Open door");

    pump(&worker, &mut controller);
    let game = controller.game().unwrap();
    let player = controller.player().unwrap();
    assert_eq!(game.narrative, "The door creaks open.");
    assert_eq!(game.location, "Corridor");
    assert_eq!(player.health, 95);
    assert_eq!(player.inventory, vec!["rusty key"]);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn submit_while_in_flight_is_rejected() {
    let session = ScriptedSession::new([
        Ok(payload("You wake up.", "Cave", 100, &[], &["Look around"])),
        Ok(payload("Nothing here.", "Cave", 100, &[], &["Look around"])),
    ]);
    let log = session.sent_log();
    let worker = TurnWorker::spawn(session);
    let mut controller = TurnController::new();
    begin(&worker, &mut controller);

    submit(&worker, &mut controller, "Look around");
    let narrative_in_flight = controller.game().unwrap().narrative.clone();
    assert_eq!(controller.submit("run away"), None);
    assert_eq!(controller.game().unwrap().narrative, narrative_in_flight);

    pump(&worker, &mut controller);
    // Only the opening turn and the first action reached the remote.
    assert_eq!(log.lock().unwrap().as_slice(), ["Begin the adventure.".to_string(), "Look around".to_string()]);
}

#[test]
fn failure_rolls_back_optimistic_append_and_keeps_session() {
    let session = ScriptedSession::new([
        Ok(payload("A goblin blocks the path.", "Tunnel", 80, &["dagger"], &["Attack goblin", "Flee"])),
        Err(GameError::Session("connection reset".into())),
        Ok("definitely not json".to_string()),
        Ok(payload("The goblin falls.", "Tunnel", 70, &["dagger", "goblin ear"], &["Continue"])),
    ]);
    let worker = TurnWorker::spawn(session);
    let mut controller = TurnController::new();
    begin(&worker, &mut controller);
    let before = controller.game().unwrap().narrative.clone();

    submit(&worker, &mut controller, "attack goblin");
    assert_eq!(controller.game().unwrap().narrative, format!("{before}\n\n> attack goblin"));
    pump(&worker, &mut controller);
    assert_eq!(controller.game().unwrap().narrative, before);
    assert_eq!(controller.error_message(), Some(TURN_FAILED_MESSAGE));
    assert_eq!(controller.player().unwrap().health, 80);

    // Malformed payload: same rollback.
    submit(&worker, &mut controller, "attack goblin");
    pump(&worker, &mut controller);
    assert_eq!(controller.game().unwrap().narrative, before);

    // Same session continues to work.
    submit(&worker, &mut controller, "attack goblin");
    pump(&worker, &mut controller);
    assert_eq!(controller.phase(), &TurnPhase::Idle);
    assert_eq!(controller.game().unwrap().narrative, "The goblin falls.");
    assert_eq!(controller.player().unwrap().inventory, vec!["dagger", "goblin ear"]);
}

#[test]
fn start_failure_reports_start_message() {
    let worker = TurnWorker::spawn(ScriptedSession::new([Ok(String::new())]));
    let mut controller = TurnController::new();
    begin(&worker, &mut controller);
    assert!(controller.start_failed());
    assert_eq!(controller.error_message(), Some(START_FAILED_MESSAGE));
    assert!(controller.submit("look").is_none());
}

#[test]
fn restart_with_fresh_worker_ignores_old_session() {
    let old = TurnWorker::spawn(ScriptedSession::new([Ok(payload("Old world.", "Ruins", 12, &["map"], &["Leave"]))]));
    let mut controller = TurnController::new();
    begin(&old, &mut controller);
    drop(old);

    controller.restart();
    assert!(controller.game().is_none());
    let fresh = TurnWorker::spawn(ScriptedSession::new([Ok(payload("New world.", "Meadow", 100, &[], &["Walk"]))]));
    fresh.request(TurnRequest::Begin).unwrap();
    pump(&fresh, &mut controller);
    assert_eq!(controller.game().unwrap().narrative, "New world.");
    assert_eq!(controller.player().unwrap().health, 100);
    assert!(controller.player().unwrap().inventory.is_empty());
}

/// A session whose remote call blows up, taking the worker thread down with it.
struct PanickingSession;

impl pixel_pioneers::ChatSession for PanickingSession {
    async fn send(&mut self, _message: &str) -> Result<String, GameError> {
        panic!("remote client crashed");
    }
}

#[test]
fn dead_worker_is_reported_once_then_goes_quiet() {
    let worker = TurnWorker::spawn(PanickingSession);
    let mut controller = TurnController::new();
    controller.begin_session();
    worker.request(TurnRequest::Begin).unwrap();

    // The opening turn fails with a Worker error once the thread dies.
    pump(&worker, &mut controller);
    assert!(controller.start_failed());

    // Draining afterwards terminates instead of repeating the error forever.
    let mut extra = 0;
    while worker.try_reply().is_some() {
        extra += 1;
        assert!(extra < 10, "disconnect reported repeatedly");
    }
    assert_eq!(extra, 0);
}
