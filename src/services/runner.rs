use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::CatalogApi;
use crate::messages::{Command, DebounceTarget, Msg};

/// Executes model commands and reports their outcomes as messages.
///
/// Fetches run on their own tasks so a slow request never blocks a newer one.
/// Only one debounce timer per target is alive at a time.
pub struct CommandRunner<C: CatalogApi> {
    client: C,
    msg_tx: mpsc::UnboundedSender<Msg>,
    timers: HashMap<DebounceTarget, JoinHandle<()>>,
}

impl<C: CatalogApi> CommandRunner<C> {
    pub fn new(client: C, msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            client,
            msg_tx,
            timers: HashMap::new(),
        }
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::FetchPage {
                request_id,
                query,
                cancel,
            } => {
                tracing::debug!(request_id, page = query.page, "fetching character page");
                let client = self.client.clone();
                let msg_tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = client.list_characters(&query, &cancel).await;
                    if let Err(e) = &result {
                        if !e.is_cancelled() {
                            tracing::warn!(request_id, "page fetch failed: {}", e);
                        }
                    }
                    let _ = msg_tx.send(Msg::page_result(request_id, result));
                });
            }

            Command::FetchByIds { request_id, ids } => {
                tracing::debug!(request_id, count = ids.len(), "fetching favorites");
                let client = self.client.clone();
                let msg_tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = client.get_characters_by_ids(&ids).await;
                    let _ = msg_tx.send(Msg::favorites_result(request_id, result));
                });
            }

            Command::FetchCharacter { request_id, id } => {
                let client = self.client.clone();
                let msg_tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = client.get_character(id).await;
                    let _ = msg_tx.send(Msg::detail_result(request_id, result));
                });
            }

            Command::StartTimer {
                target,
                token,
                delay,
            } => {
                let msg_tx = self.msg_tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = msg_tx.send(target.elapsed(token));
                });
                if let Some(previous) = self.timers.insert(target, handle) {
                    previous.abort();
                }
            }

            Command::CancelTimer { target } => {
                if let Some(handle) = self.timers.remove(&target) {
                    handle.abort();
                }
            }
        }
    }
}

impl<C: CatalogApi> Drop for CommandRunner<C> {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

/// Spawn the command runner worker
pub fn spawn_command_runner<C: CatalogApi>(
    client: C,
) -> (mpsc::UnboundedSender<Command>, mpsc::UnboundedReceiver<Msg>) {
    let (command_tx, mut command_rx) = mpsc::unbounded_channel::<Command>();
    let (msg_tx, msg_rx) = mpsc::unbounded_channel::<Msg>();

    tokio::spawn(async move {
        let mut runner = CommandRunner::new(client, msg_tx);
        while let Some(command) = command_rx.recv().await {
            runner.execute(command);
        }
        tracing::debug!("command channel closed, runner exiting");
    });

    (command_tx, msg_rx)
}
