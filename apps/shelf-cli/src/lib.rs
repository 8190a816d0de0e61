pub mod commands;
pub mod view;

pub use commands::{parse_browse_line, parse_id, parse_query_args, BrowseCommand, QueryArgs, BROWSE_HELP};
pub use view::TerminalView;
