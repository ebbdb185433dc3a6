//! Background task runner: receives commands over an MPSC channel, runs
//! the network operations on spawned tokio tasks, and reports completions
//! back to the UI as [`Action`]s.
//!
//! There is no cancellation. A superseded list fetch keeps running; its
//! completion still carries the sequence number it was issued with and the
//! view state discards it as stale.

use missions::{
    create_mission, delete_mission, list_missions, update_mission, GraphqlClient, LaunchDefaults,
    MissionInput, SortField,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};
use weather::WeatherClient;

use crate::action::{Action, MutationKind};
use crate::config::AppConfig;

/// Commands sent to the runner's control loop.
#[derive(Debug)]
pub enum TaskCommand {
    FetchMissions {
        seq: u64,
        field: SortField,
        descending: bool,
    },
    CreateMission {
        input: MissionInput,
    },
    EditMission {
        id: String,
        input: MissionInput,
    },
    DeleteMission {
        id: String,
    },
    FetchForecast,
    Shutdown,
}

type SendResult = Result<(), mpsc::error::SendError<TaskCommand>>;

/// Cloneable handle for issuing commands to the runner.
#[derive(Clone)]
pub struct TaskRunnerHandle {
    tx: mpsc::UnboundedSender<TaskCommand>,
}

impl TaskRunnerHandle {
    pub fn fetch_missions(&self, seq: u64, field: SortField, descending: bool) -> SendResult {
        self.tx.send(TaskCommand::FetchMissions {
            seq,
            field,
            descending,
        })
    }

    pub fn create_mission(&self, input: MissionInput) -> SendResult {
        self.tx.send(TaskCommand::CreateMission { input })
    }

    pub fn edit_mission(&self, id: String, input: MissionInput) -> SendResult {
        self.tx.send(TaskCommand::EditMission { id, input })
    }

    pub fn delete_mission(&self, id: String) -> SendResult {
        self.tx.send(TaskCommand::DeleteMission { id })
    }

    pub fn fetch_forecast(&self) -> SendResult {
        self.tx.send(TaskCommand::FetchForecast)
    }

    pub fn shutdown(&self) -> SendResult {
        self.tx.send(TaskCommand::Shutdown)
    }
}

pub struct TaskRunner {
    action_tx: mpsc::UnboundedSender<Action>,
    cmd_rx: mpsc::UnboundedReceiver<TaskCommand>,
    api: GraphqlClient,
    forecast: WeatherClient,
    defaults: LaunchDefaults,
    location: String,
    days: u8,
}

impl TaskRunner {
    /// Build the clients from configuration and spawn the control loop.
    pub fn spawn(
        action_tx: mpsc::UnboundedSender<Action>,
        config: &AppConfig,
    ) -> color_eyre::Result<(TaskRunnerHandle, JoinHandle<()>)> {
        let api = GraphqlClient::new(config.endpoint.clone())?;
        let forecast = WeatherClient::new(config.weather.base.clone(), config.weather.key.clone())?;

        let (tx, rx) = mpsc::unbounded_channel();
        let mut runner = TaskRunner {
            action_tx,
            cmd_rx: rx,
            api,
            forecast,
            defaults: config.launch_defaults.clone(),
            location: config.weather.location.clone(),
            days: config.weather.days,
        };
        let join = tokio::spawn(async move { runner.run().await });
        Ok((TaskRunnerHandle { tx }, join))
    }

    async fn run(&mut self) {
        info!("task runner started");
        while let Some(cmd) = self.cmd_rx.recv().await {
            match cmd {
                TaskCommand::FetchMissions {
                    seq,
                    field,
                    descending,
                } => self.spawn_fetch_missions(seq, field, descending),
                TaskCommand::CreateMission { input } => self.spawn_create(input),
                TaskCommand::EditMission { id, input } => self.spawn_edit(id, input),
                TaskCommand::DeleteMission { id } => self.spawn_delete(id),
                TaskCommand::FetchForecast => self.spawn_forecast(),
                TaskCommand::Shutdown => break,
            }
        }
        info!("task runner terminating");
    }

    fn spawn_fetch_missions(&self, seq: u64, field: SortField, descending: bool) {
        debug!("fetch missions seq={seq} field={field} desc={descending}");
        let tx = self.action_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let action = match list_missions(&api, field, descending).await {
                Ok(missions) => Action::MissionsLoaded { seq, missions },
                Err(err) => Action::MissionsFailed {
                    seq,
                    kind: err.kind(),
                    message: err.to_string(),
                },
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_create(&self, input: MissionInput) {
        debug!("create mission '{}'", input.title);
        let tx = self.action_tx.clone();
        let api = self.api.clone();
        let defaults = self.defaults.clone();
        tokio::spawn(async move {
            let action = match create_mission(&api, &input, &defaults).await {
                Ok(_) => Action::MutationSucceeded(MutationKind::Create),
                Err(err) => Action::MutationFailed {
                    kind: err.kind(),
                    message: err.to_string(),
                },
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_edit(&self, id: String, input: MissionInput) {
        debug!("edit mission {id}");
        let tx = self.action_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let action = match update_mission(&api, &id, &input).await {
                Ok(_) => Action::MutationSucceeded(MutationKind::Edit),
                Err(err) => Action::MutationFailed {
                    kind: err.kind(),
                    message: err.to_string(),
                },
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_delete(&self, id: String) {
        debug!("delete mission {id}");
        let tx = self.action_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let action = match delete_mission(&api, &id).await {
                Ok(_) => Action::MutationSucceeded(MutationKind::Delete),
                Err(err) => Action::MutationFailed {
                    kind: err.kind(),
                    message: err.to_string(),
                },
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_forecast(&self) {
        debug!("fetch forecast for {}", self.location);
        let tx = self.action_tx.clone();
        let client = self.forecast.clone();
        let location = self.location.clone();
        let days = self.days;
        tokio::spawn(async move {
            let action = match client.forecast(&location, days).await {
                Ok(days) => Action::ForecastLoaded(days),
                Err(err) => Action::ForecastFailed(err.to_string()),
            };
            let _ = tx.send(action);
        });
    }
}
