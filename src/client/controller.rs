//! Task that drives [`UserListState`] against a [`UsersApi`].

use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::client::api::UsersApi;
use crate::client::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::client::error::{ClientError, ClientResult};
use crate::client::state::{LoadTicket, PendingLoad, UserListState};
use crate::domain::types::{SearchField, UserId};
use crate::dto::users::PaginatedUsersResponse;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

const COMMAND_BUFFER: usize = 32;

/// User actions on the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    /// Search input changed; committed after the debounce delay.
    Search(String),
    Filter(SearchField),
    GoToPage(u32),
    NextPage,
    PrevPage,
    SetLimit(u32),
    ClearSearch,
    Refresh,
    /// Deletes the user, then reloads the current page.
    Delete(UserId),
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub debounce: Duration,
    pub limit: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            limit: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Cloneable front end of a running [`UserListController`].
#[derive(Clone)]
pub struct UserListHandle {
    commands: mpsc::Sender<ListCommand>,
    state: watch::Receiver<UserListState>,
}

impl UserListHandle {
    pub async fn send(&self, command: ListCommand) -> ClientResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ClientError::Closed)
    }

    /// Latest published state.
    pub fn state(&self) -> UserListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UserListState> {
        self.state.clone()
    }
}

struct InFlight {
    ticket: LoadTicket,
    handle: JoinHandle<ClientResult<PaginatedUsersResponse>>,
}

/// Owns the list state; at most one list request is in flight at a time.
pub struct UserListController<A> {
    api: Arc<A>,
    state: UserListState,
    debouncer: Debouncer<String>,
    commands: mpsc::Receiver<ListCommand>,
    updates: watch::Sender<UserListState>,
    in_flight: Option<InFlight>,
}

impl<A> UserListController<A>
where
    A: UsersApi + 'static,
{
    pub fn new(api: A, config: ControllerConfig) -> (Self, UserListHandle) {
        let state = UserListState::with_limit(config.limit);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (update_tx, update_rx) = watch::channel(state.clone());

        let controller = Self {
            api: Arc::new(api),
            state,
            debouncer: Debouncer::new(config.debounce),
            commands: command_rx,
            updates: update_tx,
            in_flight: None,
        };
        let handle = UserListHandle {
            commands: command_tx,
            state: update_rx,
        };

        (controller, handle)
    }

    /// Loads the first page, then serves commands until every handle is dropped.
    pub async fn run(mut self) {
        let initial = self.state.begin_load();
        self.start(initial);
        self.publish();

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
                term = self.debouncer.fire(), if self.debouncer.is_pending() => {
                    let load = self.state.commit_search(term);
                    self.start(load);
                }
                (ticket, result) = join(&mut self.in_flight), if self.in_flight.is_some() => {
                    self.state.apply(ticket, result);
                }
            }
            self.publish();
        }

        if let Some(flight) = self.in_flight.take() {
            flight.handle.abort();
        }
        log::debug!("User list controller stopped");
    }

    async fn handle(&mut self, command: ListCommand) {
        let load = match command {
            ListCommand::Search(term) => {
                self.state.set_search_term(term.clone());
                self.debouncer.push(term);
                None
            }
            ListCommand::Filter(field) => Some(self.state.set_filter(field)),
            ListCommand::GoToPage(page) => self.state.change_page(page),
            ListCommand::NextPage => self.state.next_page(),
            ListCommand::PrevPage => self.state.prev_page(),
            ListCommand::SetLimit(limit) => self.state.set_limit(limit),
            ListCommand::ClearSearch => {
                self.debouncer.cancel();
                Some(self.state.clear_search())
            }
            ListCommand::Refresh => Some(self.state.refresh()),
            ListCommand::Delete(id) => match self.api.delete_user(&id).await {
                Ok(()) => Some(self.state.refresh()),
                Err(err) => {
                    log::error!("Failed to delete user {id}: {err}");
                    self.state.last_error = Some(err.to_string());
                    None
                }
            },
        };

        if let Some(load) = load {
            self.start(load);
        }
    }

    /// Spawns the request, aborting whatever was still in flight.
    fn start(&mut self, load: PendingLoad) {
        if let Some(previous) = self.in_flight.take() {
            log::debug!("Cancelling users request {:?}", previous.ticket);
            previous.handle.abort();
        }

        let api = Arc::clone(&self.api);
        let query = load.query;
        let handle = tokio::spawn(async move { api.list_page(&query).await });

        self.in_flight = Some(InFlight {
            ticket: load.ticket,
            handle,
        });
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }
}

async fn join(
    in_flight: &mut Option<InFlight>,
) -> (LoadTicket, ClientResult<PaginatedUsersResponse>) {
    let Some(flight) = in_flight.as_mut() else {
        return future::pending().await;
    };

    let result = match (&mut flight.handle).await {
        Ok(result) => result,
        Err(err) => Err(ClientError::Task(err.to_string())),
    };
    let ticket = flight.ticket;
    *in_flight = None;

    (ticket, result)
}
