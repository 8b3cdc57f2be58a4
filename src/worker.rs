//! ターンワーカー（TUIとは別スレッドで動く）
//!
//! セッションハンドルはこのスレッドだけが所有する。TUI側はチャンネルで
//! 要求を送り、毎フレーム非ブロッキングで結果を受け取る。
//! やり直し時はワーカーごと破棄するので、古い応答が新しいゲームに届くことはない。

use crate::error::GameError;
use crate::models::Turn;
use crate::session::{ChatSession, play_turn, start_session};
use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tokio::runtime::Runtime;
use tracing::{error, info};

/// ワーカーへの要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnRequest {
    /// 最初のターンを送ってセッションを開始
    Begin,
    /// プレイヤーの行動
    Action(String),
}

/// ワーカーへのハンドル
pub struct TurnWorker {
    tx: Sender<TurnRequest>,
    rx: Receiver<Result<Turn, GameError>>,
    /// スレッド停止を一度報告したか
    disconnected: Cell<bool>,
}

impl TurnWorker {
    /// セッションを受け取り、専用スレッドでワーカーを開始
    pub fn spawn<S>(session: S) -> Self
    where
        S: ChatSession + Send + 'static,
    {
        let (tx_request, rx_request) = mpsc::channel::<TurnRequest>();
        let (tx_reply, rx_reply) = mpsc::channel::<Result<Turn, GameError>>();

        std::thread::spawn(move || {
            // 専用スレッド内でTokioランタイムを構築
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!(target: "worker", "runtime_build_failed: {e}");
                    // 要求ごとにエラーを返し続ける
                    while rx_request.recv().is_ok() {
                        let _ = tx_reply.send(Err(GameError::Worker(e.to_string())));
                    }
                    return;
                }
            };
            rt.block_on(run_loop(session, rx_request, tx_reply));
        });

        Self { tx: tx_request, rx: rx_reply, disconnected: Cell::new(false) }
    }

    /// 要求を送る
    pub fn request(&self, request: TurnRequest) -> Result<(), GameError> {
        self.tx.send(request).map_err(|_| GameError::Worker("worker thread has stopped".into()))
    }

    /// 届いている結果があれば取り出す
    ///
    /// スレッドが止まっていればそのことを一度だけ `Worker` エラーとして返し、以降は `None`。
    pub fn try_reply(&self) -> Option<Result<Turn, GameError>> {
        match self.rx.try_recv() {
            Ok(reply) => Some(reply),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) if self.disconnected.get() => None,
            Err(TryRecvError::Disconnected) => {
                self.disconnected.set(true);
                error!(target: "worker", "worker_disconnected");
                Some(Err(GameError::Worker("worker thread has stopped".into())))
            }
        }
    }
}

async fn run_loop<S: ChatSession>(
    session: S,
    rx_request: Receiver<TurnRequest>,
    tx_reply: Sender<Result<Turn, GameError>>,
) {
    // 開始前と開始失敗後は None
    let mut pending = Some(session);
    let mut active: Option<S> = None;

    while let Ok(request) = rx_request.recv() {
        info!(target: "worker", ?request, "request_received");
        let reply = match request {
            TurnRequest::Begin => match pending.take() {
                Some(session) => match start_session(session).await {
                    Ok((session, game, player)) => {
                        active = Some(session);
                        Ok(Turn { game, player })
                    }
                    Err(e) => Err(e),
                },
                None => Err(GameError::Session("session already started".into())),
            },
            TurnRequest::Action(action) => match active.as_mut() {
                Some(session) => play_turn(session, &action).await,
                None => Err(GameError::Session("no active session".into())),
            },
        };
        match &reply {
            Ok(turn) => info!(target: "worker", location = %turn.game.location, "reply_ready"),
            Err(e) => error!(target: "worker", "reply_error: {e}"),
        }
        if tx_reply.send(reply).is_err() {
            // 受け手が破棄された（やり直し）
            break;
        }
    }
    info!(target: "worker", "worker_stopped");
}
