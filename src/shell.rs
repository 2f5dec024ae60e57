//! Line-oriented terminal front end: owns the current screen, routes between
//! screens and renders them.

use std::cell::Cell;
use std::io::Write;
use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::api::LeadApi;
use crate::date::format_timestamp;
use crate::domain::event::EventType;
use crate::domain::types::LeadId;
use crate::forms::create::IdentifierMode;
use crate::forms::filters::LeadFilterForm;
use crate::routes::{Route, RouteError};
use crate::views::create::CreateLeadView;
use crate::views::detail::LeadDetailView;
use crate::views::list::LeadListView;
use crate::views::{Confirm, DELETE_PROMPT, Navigator, ViewStatus};

const HELP: &str = "\
Commands:
  ls                                   list all leads
  filter [email=..] [tracking_id=..] [from_date=YYYY-MM-DD] [to_date=YYYY-MM-DD]
  show <lead uuid>                     open a lead
  rm [<lead uuid>]                     delete a lead (the open one on its screen)
  new id <tracking id> [campaign]      create a lead from a tracking id
  new email <address> [campaign]       create a lead from an email
  event open|click                     record an event for the open lead
  url <campaign> <tracking id>         print a tracking redirect URL
  go <path>                            open /, /create or /leads/<uuid>
  health                               query backend health
  help                                 show this help
  quit                                 exit";

const NEW_USAGE: &str = "new id|email <value> [campaign]";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown filter `{0}`")]
    UnknownFilter(String),
    #[error("invalid lead id: {0}")]
    InvalidLeadId(String),
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Filter(LeadFilterForm),
    Show(LeadId),
    Delete(Option<LeadId>),
    New {
        mode: IdentifierMode,
        value: String,
        campaign_name: String,
    },
    Event(EventType),
    Url {
        campaign_name: String,
        tracking_id: String,
    },
    Go(Route),
    Health,
    Help,
    Quit,
}

fn parse_lead_id(raw: &str) -> Result<LeadId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidLeadId(raw.to_string()))
}

fn parse_filters<'a>(args: impl Iterator<Item = &'a str>) -> Result<LeadFilterForm, CommandError> {
    let mut form = LeadFilterForm::default();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or(CommandError::Usage("filter key=value ..."))?;
        let slot = match key {
            "email" => &mut form.email,
            "tracking_id" => &mut form.tracking_id,
            "from_date" => &mut form.from_date,
            "to_date" => &mut form.to_date,
            other => return Err(CommandError::UnknownFilter(other.to_string())),
        };
        *slot = value.to_string();
    }
    Ok(form)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let command = match name {
            "ls" => Command::List,
            "filter" => Command::Filter(parse_filters(words.by_ref())?),
            "show" => {
                let raw = words.next().ok_or(CommandError::Usage("show <lead uuid>"))?;
                Command::Show(parse_lead_id(raw)?)
            }
            "rm" => Command::Delete(words.next().map(parse_lead_id).transpose()?),
            "new" => {
                let mode = match words.next() {
                    Some("id") => IdentifierMode::LeadId,
                    Some("email") => IdentifierMode::Email,
                    _ => return Err(CommandError::Usage(NEW_USAGE)),
                };
                let value = words
                    .next()
                    .ok_or(CommandError::Usage(NEW_USAGE))?
                    .to_string();
                let campaign_name = words.by_ref().collect::<Vec<_>>().join(" ");
                Command::New {
                    mode,
                    value,
                    campaign_name,
                }
            }
            "event" => {
                let event_type = words
                    .next()
                    .and_then(|raw| raw.parse().ok())
                    .ok_or(CommandError::Usage("event open|click"))?;
                Command::Event(event_type)
            }
            "url" => {
                let (Some(campaign_name), Some(tracking_id)) = (words.next(), words.next()) else {
                    return Err(CommandError::Usage("url <campaign> <tracking id>"));
                };
                Command::Url {
                    campaign_name: campaign_name.to_string(),
                    tracking_id: tracking_id.to_string(),
                }
            }
            "go" => Command::Go(words.next().unwrap_or("/").parse()?),
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        if words.next().is_some() {
            return Err(CommandError::Usage("too many arguments, type `help`"));
        }
        Ok(command)
    }
}

/// Records the route a controller asked for; the shell follows it after the
/// controller call returns.
#[derive(Debug, Default)]
struct RouteSlot(Cell<Option<Route>>);

impl RouteSlot {
    fn take(&self) -> Option<Route> {
        self.0.take()
    }
}

impl Navigator for RouteSlot {
    fn navigate(&self, route: Route) {
        self.0.set(Some(route));
    }
}

/// Answer read from the terminal before the controller asks for it.
struct Answer(bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

#[derive(Debug)]
enum Screen {
    List(LeadListView),
    Detail(LeadDetailView),
    Create(CreateLeadView),
}

impl Screen {
    fn route(&self) -> Route {
        match self {
            Screen::List(_) => Route::LeadList,
            Screen::Detail(view) => Route::LeadDetail(view.id()),
            Screen::Create(_) => Route::CreateLead,
        }
    }

    fn teardown(&mut self) {
        match self {
            Screen::List(view) => view.teardown(),
            Screen::Detail(view) => view.teardown(),
            Screen::Create(view) => view.teardown(),
        }
    }
}

pub struct Shell<'a, A>
where
    A: LeadApi + ?Sized,
{
    api: &'a A,
    screen: Screen,
}

impl<'a, A> Shell<'a, A>
where
    A: LeadApi + ?Sized,
{
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            screen: Screen::List(LeadListView::new()),
        }
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        self.open(Route::LeadList, out).await?;
        loop {
            write!(out, "{}> ", self.route())?;
            out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, &mut lines, out).await?,
                Err(CommandError::Empty) => {}
                Err(err) => writeln!(out, "{err}")?,
            }
        }
        self.screen.teardown();
        Ok(())
    }

    /// Leaves the current screen and mounts the one at `route`.
    pub async fn open<W>(&mut self, route: Route, out: &mut W) -> Result<(), ShellError>
    where
        W: Write,
    {
        self.screen.teardown();
        log::debug!("Opening {route}");
        self.screen = match route {
            Route::LeadList => {
                let mut view = LeadListView::new();
                view.mount(self.api).await;
                Screen::List(view)
            }
            Route::LeadDetail(id) => {
                let mut view = LeadDetailView::new(id);
                view.mount(self.api).await;
                Screen::Detail(view)
            }
            Route::CreateLead => Screen::Create(CreateLeadView::new()),
        };
        self.render(out)
    }

    async fn follow<W>(&mut self, slot: &RouteSlot, out: &mut W) -> Result<(), ShellError>
    where
        W: Write,
    {
        match slot.take() {
            Some(route) => self.open(route, out).await,
            None => self.render(out),
        }
    }

    pub async fn execute<R, W>(
        &mut self,
        command: Command,
        lines: &mut Lines<R>,
        out: &mut W,
    ) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let api = self.api;
        match command {
            Command::List => self.open(Route::LeadList, out).await,
            Command::Filter(form) => {
                if !matches!(self.screen, Screen::List(_)) {
                    self.open(Route::LeadList, out).await?;
                }
                if let Screen::List(view) = &mut self.screen {
                    view.form = form;
                    view.apply_filters(api).await;
                }
                self.render(out)
            }
            Command::Show(id) => self.open(Route::LeadDetail(id), out).await,
            Command::Delete(target) => {
                let id = match (&self.screen, target) {
                    (_, Some(id)) => id,
                    (Screen::Detail(view), None) => view.id(),
                    _ => {
                        writeln!(out, "usage: rm <lead uuid>")?;
                        return Ok(());
                    }
                };
                let owned = match &self.screen {
                    Screen::List(_) => true,
                    Screen::Detail(view) => view.id() == id,
                    Screen::Create(_) => false,
                };
                if !owned {
                    self.open(Route::LeadList, out).await?;
                }
                let answer = ask(DELETE_PROMPT, lines, out).await?;
                let slot = RouteSlot::default();
                match &mut self.screen {
                    Screen::Detail(view) => {
                        view.delete(api, &answer, &slot).await;
                    }
                    Screen::List(view) => {
                        view.delete(api, &answer, id).await;
                    }
                    Screen::Create(_) => {}
                }
                self.follow(&slot, out).await
            }
            Command::New {
                mode,
                value,
                campaign_name,
            } => {
                if !matches!(self.screen, Screen::Create(_)) {
                    self.open(Route::CreateLead, out).await?;
                }
                let slot = RouteSlot::default();
                if let Screen::Create(view) = &mut self.screen {
                    view.set_mode(mode);
                    match mode {
                        IdentifierMode::LeadId => view.form.lead_id = value,
                        IdentifierMode::Email => view.form.email = value,
                    }
                    view.form.campaign_name = campaign_name;
                    view.submit(api, &slot).await;
                }
                self.follow(&slot, out).await
            }
            Command::Event(event_type) => {
                let Screen::Detail(view) = &mut self.screen else {
                    writeln!(out, "Open a lead first: show <lead uuid>")?;
                    return Ok(());
                };
                view.record_event(api, event_type).await;
                self.render(out)
            }
            Command::Url {
                campaign_name,
                tracking_id,
            } => {
                writeln!(out, "{}", api.tracking_url(&campaign_name, &tracking_id))?;
                Ok(())
            }
            Command::Go(route) => self.open(route, out).await,
            Command::Health => {
                match api.health().await {
                    Ok(body) => writeln!(out, "{body}")?,
                    Err(err) => writeln!(out, "Backend unavailable: {err}")?,
                }
                Ok(())
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    pub fn render<W>(&self, out: &mut W) -> Result<(), ShellError>
    where
        W: Write,
    {
        match &self.screen {
            Screen::List(view) => render_list(view, out)?,
            Screen::Detail(view) => render_detail(view, self.api, out)?,
            Screen::Create(view) => render_create(view, out)?,
        }
        Ok(())
    }
}

async fn ask<R, W>(prompt: &str, lines: &mut Lines<R>, out: &mut W) -> Result<Answer, ShellError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let reply = lines.next_line().await?.unwrap_or_default();
    let reply = reply.trim().to_lowercase();
    Ok(Answer(reply == "y" || reply == "yes"))
}

fn render_list<W: Write>(view: &LeadListView, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Leads")?;
    if let Some(message) = view.error_message() {
        writeln!(out, "Error: {message}")?;
    }
    match view.status() {
        ViewStatus::Loading => return writeln!(out, "Loading..."),
        ViewStatus::Success if view.leads().is_empty() => {
            return writeln!(out, "No leads found.");
        }
        _ => {}
    }
    for row in view.rows() {
        writeln!(
            out,
            "{}  {:<20} {:<16} {:<8} opened {:<18} clicked {}{}",
            row.id,
            row.tracking_id,
            row.campaign_name,
            row.engagement,
            row.opened_at,
            row.first_click_at,
            if row.busy { "  (deleting)" } else { "" },
        )?;
    }
    Ok(())
}

fn render_detail<A, W>(view: &LeadDetailView, api: &A, out: &mut W) -> std::io::Result<()>
where
    A: LeadApi + ?Sized,
    W: Write,
{
    if let Some(message) = view.error_message() {
        writeln!(out, "Error: {message}")?;
    }
    let Some(page) = view.page(api) else {
        if view.status() == ViewStatus::Loading {
            writeln!(out, "Loading...")?;
        }
        return Ok(());
    };
    writeln!(out, "Lead {}", page.id)?;
    writeln!(out, "  Tracking ID:  {}", page.tracking_id)?;
    writeln!(out, "  Campaign:     {}", page.campaign_name)?;
    writeln!(out, "  Email:        {}", page.email)?;
    writeln!(out, "  Status:       {}", page.engagement)?;
    writeln!(out, "  Created:      {}", page.created_at)?;
    writeln!(out, "  Opened:       {}", page.opened_at)?;
    writeln!(out, "  First click:  {}", page.first_click_at)?;
    writeln!(out, "  Tracking URL: {}", page.tracking_url)?;
    if let Some(event) = view.last_event() {
        writeln!(
            out,
            "  Last event:   {} at {}",
            event.event_type,
            format_timestamp(Some(&event.created_at))
        )?;
    }
    if view.is_deleting() {
        writeln!(out, "  Deleting...")?;
    }
    Ok(())
}

fn render_create<W: Write>(view: &CreateLeadView, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Create lead")?;
    if let Some(message) = view.error_message() {
        writeln!(out, "Error: {message}")?;
    }
    if view.is_submitting() {
        writeln!(out, "Creating...")?;
    } else {
        writeln!(out, "Use `new id <tracking id> [campaign]` or `new email <address> [campaign]`.")?;
    }
    Ok(())
}
