use color_eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::{
    action::Action,
    cli::Cli,
    components::{
        popup::{centered_rect_fixed, render_backdrop},
        popups::{confirm::ConfirmPopup, mission_form::MissionFormPopup},
        Component, PopupComponent,
    },
    config::AppConfig,
    pages::{MissionsPage, Page, WeatherPage},
    state::MissionDraft,
    tasks::TaskRunner,
    tui::{Event, EventResponse, Tui},
};

pub struct App {
    config: AppConfig,
    tick_rate: f64,
    frame_rate: f64,
    pages: Vec<Box<dyn Page>>,
    active_page: usize,
    popup: Option<Box<dyn PopupComponent>>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        crate::config::ensure_data_and_config_dirs_exist()?;
        let mut config = AppConfig::new()?;
        if let Some(endpoint) = &cli.endpoint {
            config.endpoint = endpoint.clone();
        }

        Ok(Self {
            config,
            tick_rate: cli.tick_rate,
            frame_rate: cli.frame_rate,
            pages: vec![
                Box::new(MissionsPage::new()),
                Box::new(WeatherPage::new()),
            ],
            active_page: cli.start_page(),
            popup: None,
            should_quit: false,
            should_suspend: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
        let (runner, _runner_join) = TaskRunner::spawn(action_tx.clone(), &self.config)?;

        for page in self.pages.iter_mut() {
            page.register_action_handler(action_tx.clone())?;
            page.register_task_runner(runner.clone())?;
            page.init()?;
        }
        // entering the start page issues the initial fetch
        self.pages[self.active_page].on_enter()?;

        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    Event::Quit => {
                        let _ = action_tx.send(Action::Quit);
                    }
                    Event::Tick => {
                        let _ = action_tx.send(Action::Tick);
                    }
                    Event::Render => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Resize(x, y) => {
                        let _ = action_tx.send(Action::Resize(x, y));
                    }
                    other => {
                        // Popups are modal: while one is open it sees the
                        // events and the page does not.
                        let response = if let Some(popup) = self.popup.as_mut() {
                            popup.handle_events(other)?
                        } else if let Some(page) = self.pages.get_mut(self.active_page) {
                            page.handle_events(other)?
                        } else {
                            None
                        };
                        match response {
                            Some(EventResponse::Continue(action))
                            | Some(EventResponse::Stop(action)) => {
                                let _ = action_tx.send(action);
                            }
                            None => {}
                        }
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                match &action {
                    Action::Tick | Action::Render => {}
                    _ => debug!("{action}"),
                }
                match action.clone() {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.draw(&mut tui, &action_tx)?;
                    }
                    Action::Render => {
                        self.draw(&mut tui, &action_tx)?;
                    }
                    Action::Navigate(page) if page < self.pages.len() => {
                        if page != self.active_page {
                            self.pages[self.active_page].on_exit()?;
                            self.active_page = page;
                            self.pages[self.active_page].on_enter()?;
                        }
                    }
                    Action::OpenCreate => {
                        self.popup = Some(Box::new(MissionFormPopup::create()));
                    }
                    Action::OpenEdit(ref mission) => {
                        self.popup = Some(Box::new(MissionFormPopup::edit(
                            MissionDraft::from_mission(mission),
                        )));
                    }
                    Action::OpenDelete { ref title, .. } => {
                        let question =
                            format!("Delete mission \"{title}\"?\nThis cannot be undone.");
                        self.popup = Some(Box::new(
                            ConfirmPopup::new("Delete Mission", question).ok_label("Delete"),
                        ));
                    }
                    Action::ClosePopup => {
                        self.popup = None;
                    }
                    Action::Error(ref message) => {
                        error!("{message}");
                    }
                    _ => {}
                }

                // The active page always sees the action: popup results and
                // task completions must reach the state machine even while a
                // popup is open.
                if let Some(page) = self.pages.get_mut(self.active_page) {
                    if let Some(next) = page.update(action.clone())? {
                        let _ = action_tx.send(next);
                    }
                }
                if let Some(popup) = self.popup.as_mut() {
                    if let Some(next) = popup.update(action)? {
                        let _ = action_tx.send(next);
                    }
                }
            }

            if self.should_suspend {
                tui.suspend()?;
                let _ = action_tx.send(Action::Resume);
                let _ = action_tx.send(Action::Render);
                tui = Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }

        let _ = runner.shutdown();
        tui.exit()?;
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        tui.draw(|frame| {
            if let Err(err) = self.render(frame) {
                let _ = action_tx.send(Action::Error(format!("Failed to draw: {err:?}")));
            }
        })?;
        Ok(())
    }

    fn render(&mut self, frame: &mut ratatui::Frame<'_>) -> Result<()> {
        let layout =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());

        if let Some(page) = self.pages.get_mut(self.active_page) {
            page.draw(frame, layout[0])?;
        }

        // popup over a dimmed backdrop, centered on the page area
        if let Some(popup) = self.popup.as_mut() {
            render_backdrop(frame, layout[0]);
            let (min_w, min_h) = popup.min_size();
            let dialog = centered_rect_fixed(
                layout[0],
                min_w.min(layout[0].width),
                min_h.min(layout[0].height),
            );
            popup.draw(frame, dialog)?;
        }

        // footer: key hints left, error toast right
        let cols = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[1]);
        let hints = if self.popup.is_some() {
            "Tab: Next  Enter: Confirm  Esc: Cancel"
        } else if let Some(page) = self.pages.get(self.active_page) {
            page.hint_line()
        } else {
            ""
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hints,
                Style::default().fg(Color::DarkGray),
            ))),
            cols[0],
        );
        if let Some(toast) = self
            .pages
            .get(self.active_page)
            .and_then(|page| page.toast())
        {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    toast,
                    Style::default().fg(Color::Red),
                )))
                .alignment(Alignment::Right),
                cols[1],
            );
        }
        Ok(())
    }
}
