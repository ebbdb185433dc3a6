use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flightdeck", version, about = "Solar Rocket mission console")]
pub struct Cli {
    /// GraphQL endpoint of the mission service (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Tick rate, i.e. ticks per second
    #[arg(long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. frames per second
    #[arg(long, value_name = "FLOAT", default_value_t = 30.0)]
    pub frame_rate: f64,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Open the mission board (default)
    Missions,
    /// Open the launch-site weather forecast
    Weather,
}

impl Cli {
    /// Index of the page the UI starts on.
    pub fn start_page(&self) -> usize {
        match self.cmd.unwrap_or(Cmd::Missions) {
            Cmd::Missions => 0,
            Cmd::Weather => 1,
        }
    }
}
