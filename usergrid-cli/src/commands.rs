//! Line commands and how they map onto grid transitions.

use std::str::FromStr;

use usergrid_lib::api::query::Direction;
use usergrid_lib::error::GridError;
use usergrid_lib::grid::GridController;
use usergrid_lib::grid::SortState;
use usergrid_lib::model::ColumnKey;

pub const HELP: &str = "\
Commands:
  sort <column> [asc|desc|none]   cycle or set the sort
  filter <column> [text]          set a filter (empty text clears it)
  clear                           clear every filter
  next | prev | page <n>          navigate pages
  size <n>                        change the page size
  resize <column> <delta>         widen or narrow a column
  drag <column> <x> | move <x> | drop
                                  resize a column with a pointer gesture
  select <id> | close             open or close a record
  refresh                         re-run the current query
  show | json                     print the grid as a table or as JSON
  help | quit
Columns: fullName age gender phone email country city";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sort(ColumnKey, Option<SortState>),
    Filter(ColumnKey, String),
    ClearFilters,
    NextPage,
    PrevPage,
    GoToPage(usize),
    PageSize(usize),
    Resize(ColumnKey, i32),
    BeginDrag(ColumnKey, i32),
    DragTo(i32),
    EndDrag,
    Select(u64),
    CloseDetail,
    Refresh,
    Show,
    Json,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("{0:?} is not a valid number")]
    InvalidNumber(String),

    #[error("{0:?} is not a sort direction (asc, desc or none)")]
    InvalidDirection(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match name.to_ascii_lowercase().as_str() {
            "sort" | "s" => {
                let column = column(args.next())?;
                let sort = match args.next() {
                    None => None,
                    Some(direction) => Some(match direction.to_ascii_lowercase().as_str() {
                        "asc" => SortState::asc(column),
                        "desc" => SortState::desc(column),
                        "none" => SortState::none(),
                        _ => return Err(CommandError::InvalidDirection(direction.to_string())),
                    }),
                };
                Command::Sort(column, sort)
            }
            "filter" | "f" => {
                let column = column(args.next())?;
                let text = rest
                    .split_once(char::is_whitespace)
                    .map(|(_, text)| text.trim())
                    .unwrap_or_default();
                Command::Filter(column, text.to_string())
            }
            "clear" => Command::ClearFilters,
            "next" | "n" => Command::NextPage,
            "prev" | "p" => Command::PrevPage,
            "page" => Command::GoToPage(number(args.next(), "page number")?),
            "size" => Command::PageSize(number(args.next(), "page size")?),
            "resize" => {
                let column = column(args.next())?;
                Command::Resize(column, number(args.next(), "width delta")?)
            }
            "drag" => {
                let column = column(args.next())?;
                Command::BeginDrag(column, number(args.next(), "pointer position")?)
            }
            "move" => Command::DragTo(number(args.next(), "pointer position")?),
            "drop" => Command::EndDrag,
            "select" | "open" => Command::Select(number(args.next(), "record id")?),
            "close" => Command::CloseDetail,
            "refresh" | "r" => Command::Refresh,
            "show" | "" => Command::Show,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn column(arg: Option<&str>) -> Result<ColumnKey, CommandError> {
    Ok(arg.ok_or(CommandError::MissingArgument("column"))?.parse()?)
}

fn number<T: FromStr>(arg: Option<&str>, what: &'static str) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(what))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

/// Applies a grid command. Commands that only print are left to the caller.
pub fn apply(command: &Command, grid: &mut GridController) -> Result<(), CommandError> {
    match command {
        Command::Sort(column, None) => grid.toggle_sort(*column),
        Command::Sort(_, Some(sort)) => grid.set_sort(*sort),
        Command::Filter(column, text) => grid.set_filter(*column, text.as_str()),
        Command::ClearFilters => grid.clear_filters(),
        Command::NextPage => grid.next_page(),
        Command::PrevPage => grid.prev_page(),
        Command::GoToPage(page) => grid.go_to_page(*page),
        Command::PageSize(size) => grid.set_page_size(*size)?,
        Command::Resize(column, delta) => grid.resize(*column, *delta),
        Command::BeginDrag(column, x) => grid.begin_resize(*column, *x),
        Command::DragTo(x) => grid.resize_to(*x),
        Command::EndDrag => grid.end_resize(),
        Command::Select(id) => {
            if !grid.select(*id) {
                log::debug!("Record {} is not on the current page", id);
            }
        }
        Command::CloseDetail => grid.clear_selection(),
        Command::Refresh => grid.refresh(),
        Command::Show | Command::Json | Command::Help | Command::Quit => {}
    }
    Ok(())
}

/// Short label of a sort direction for headers.
pub fn direction_marker(direction: Direction) -> &'static str {
    match direction {
        Direction::Asc => "^",
        Direction::Desc => "v",
    }
}
